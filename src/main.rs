//! Pageripper main entry point
//!
//! Command-line collaborator around the scrape pipeline: validates the
//! target URL, fetches it, bumps the global usage counter, runs the rip,
//! and prints the JSON report.

use anyhow::Context;
use clap::Parser;
use pageripper::config::{load_config, Config};
use pageripper::fetch::{build_http_client, fetch_target};
use pageripper::storage::USAGE_KEY;
use pageripper::{rip, CounterStore, ScrapeReport, SqliteCounterStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

const INVALID_TARGET_MESSAGE: &str =
    "Please submit a valid, absolute URL such as https://example.com";

const RELATIVE_TARGET_MESSAGE: &str = "Relative URLs such as /example.html are not supported. \
     Please supply a fully qualified URL such as https://www.example.com";

/// Pageripper: single-page link scraper
///
/// Fetches one page, extracts every hyperlink and the hostnames those
/// links point to, and prints a tallied JSON report.
#[derive(Parser, Debug)]
#[command(name = "pageripper")]
#[command(version)]
#[command(about = "Scrape the links from a single web page", long_about = None)]
struct Cli {
    /// Absolute URL of the page to scrape
    #[arg(value_name = "TARGET")]
    target: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    let target = parse_target(&cli.target)?;

    let store: Arc<dyn CounterStore> = Arc::new(
        SqliteCounterStore::new(Path::new(&config.counter.database_path))
            .context("Failed to open the usage counter database")?,
    );

    let client = build_http_client(&config.fetcher)?;

    tracing::info!("Ripping target {}", target);
    let body = fetch_target(&client, &target).await?;

    // Bump the global scrape counter off the response path. The count is
    // more for fun than anything else; failures are logged and forgotten.
    let increment_store = Arc::clone(&store);
    tokio::task::spawn_blocking(move || {
        if let Err(e) = increment_store.increment(USAGE_KEY) {
            tracing::warn!("Failed to update usage counter: {}", e);
        }
    });

    let outcome = rip(&target, body, store).await;
    let report = ScrapeReport::from(outcome);

    tracing::info!("Rip finished for {}", target);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pageripper=info,warn"),
            1 => EnvFilter::new("pageripper=debug,info"),
            2 => EnvFilter::new("pageripper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Validates the user-supplied target URL
///
/// Only absolute http/https URLs are accepted; anything else gets the
/// user-facing error message.
fn parse_target(raw: &str) -> anyhow::Result<Url> {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(url),
        Ok(_) => anyhow::bail!(INVALID_TARGET_MESSAGE),
        Err(url::ParseError::RelativeUrlWithoutBase) => anyhow::bail!(RELATIVE_TARGET_MESSAGE),
        Err(_) => anyhow::bail!(INVALID_TARGET_MESSAGE),
    }
}
