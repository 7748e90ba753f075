//! Configuration module
//!
//! Loads and validates the optional TOML configuration file controlling the
//! HTTP fetcher and the usage-counter store. Every key has a default, so
//! running without a config file is fully supported.

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure for pageripper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub counter: CounterConfig,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with the page request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Overall request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Usage-counter store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CounterConfig {
    /// Path to the SQLite database holding the usage counter
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_user_agent() -> String {
    concat!("pageripper/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_database_path() -> String {
    "./pageripper.db".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a configuration, rejecting values the fetcher or store
/// cannot work with
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.fetcher.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetcher.user-agent must not be empty".to_string(),
        ));
    }

    if config.fetcher.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher.timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.fetcher.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher.connect-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.counter.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "counter.database-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
