//! Quotes-Harvest: a batched pagination scraper
//!
//! This crate walks a paginated HTML listing in concurrent batches, extracts
//! quote records from every page, and writes the aggregated records to CSV.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use std::path::Path;
use thiserror::Error;

/// Main error type for Quotes-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Errors raised when a fetched page no longer matches the expected markup
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page {page}: item {item} has no '{field}' element")]
    MissingField {
        page: u32,
        item: usize,
        field: &'static str,
    },

    #[error("Page {page}: body is not valid UTF-8: {source}")]
    Encoding {
        page: u32,
        source: std::str::Utf8Error,
    },
}

/// Result type alias for Quotes-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, Quote};
pub use output::RunStatistics;

/// Scrapes the default site and writes every quote to `output_path`
///
/// Uses the built-in configuration (batch size 10). The CSV file is only
/// created once the whole listing has been traversed, so a failed run leaves
/// no partial output behind.
///
/// # Arguments
///
/// * `output_path` - Where the CSV file is written; used exactly as given
///
/// # Returns
///
/// * `Ok(RunStatistics)` - The listing was traversed and the file written
/// * `Err(HarvestError)` - Markup did not match, or the file could not be written
pub async fn run(output_path: &Path) -> Result<RunStatistics> {
    run_with_config(&default_config_for(output_path)).await
}

/// Built-in configuration writing to `output_path`
fn default_config_for(output_path: &Path) -> Config {
    let mut config = Config::default();
    config.output.csv_path = output_path.to_path_buf();
    config
}

/// Scrapes the configured site and writes the quotes to the configured CSV path
///
/// # Arguments
///
/// * `config` - A validated configuration
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Counters, timing and the path that was written
/// * `Err(HarvestError)` - The harvest or the CSV write failed
pub async fn run_with_config(config: &Config) -> Result<RunStatistics> {
    let started_at = chrono::Utc::now();

    // Traverse the whole listing before touching the output file
    let (quotes, traversal) = harvest(config).await?;

    let output_path = config.output.csv_path.as_path();
    output::write_quotes(&quotes, output_path)?;
    tracing::info!(
        "Wrote {} quotes to {}",
        quotes.len(),
        output_path.display()
    );

    Ok(RunStatistics {
        started_at,
        finished_at: chrono::Utc::now(),
        output_path: output_path.to_path_buf(),
        quotes_written: quotes.len(),
        traversal,
    })
}
