//! Pageripper: single-page link scraper
//!
//! This crate fetches one web page, streams its HTML through a tokenizer,
//! extracts every hyperlink and the hostnames those links point to, and
//! produces a tallied report along with a best-effort global usage counter.

pub mod config;
pub mod fetch;
pub mod report;
pub mod rip;
pub mod storage;

use thiserror::Error;

/// Main error type for pageripper operations
///
/// Nothing inside the scrape pipeline itself is fatal; these variants cover
/// the collaborator paths that run before the pipeline is handed a byte
/// stream (target validation, fetching, store setup).
#[derive(Debug, Error)]
pub enum RipError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not retrieve URL {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Target returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for pageripper operations
pub type Result<T> = std::result::Result<T, RipError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use report::ScrapeReport;
pub use rip::{rip, RipOutcome};
pub use storage::{CounterStore, SqliteCounterStore};
