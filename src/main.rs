//! Quotes-Harvest main entry point
//!
//! This is the command-line interface for the Quotes-Harvest scraper.

use anyhow::Context;
use clap::Parser;
use quotes_harvest::config::{load_config_with_hash, validate, Config};
use quotes_harvest::output::print_statistics;
use quotes_harvest::ConfigError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quotes-Harvest: a batched pagination scraper
///
/// Walks every page of a quotes listing, fetching pages concurrently in
/// rounds, and writes all quotes to a CSV file with the columns
/// text, author and tags.
#[derive(Parser, Debug)]
#[command(name = "quotes-harvest")]
#[command(version)]
#[command(about = "Scrapes a paginated quotes listing into CSV", long_about = None)]
struct Cli {
    /// Path of the CSV file to write (overrides the configured path)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }

    if cli.dry_run {
        handle_dry_run(&config).context("Invalid configuration")?;
        return Ok(());
    }

    // The output override bypasses file validation, so check the merged result
    validate(&config).context("Invalid configuration")?;

    let stats = quotes_harvest::run_with_config(&config)
        .await
        .context("Harvest failed")?;

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quotes_harvest=info,warn"),
            1 => EnvFilter::new("quotes_harvest=debug,info"),
            2 => EnvFilter::new("quotes_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates and shows the effective configuration
///
/// Nothing is printed when validation fails; the error is returned instead.
fn handle_dry_run(config: &Config) -> Result<(), ConfigError> {
    validate(config)?;

    println!("=== Quotes-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Page path: {}", config.site.page_path);

    println!("\nSelectors:");
    println!("  Item: {}", config.selectors.item);
    println!("  Text: {}", config.selectors.text);
    println!("  Author: {}", config.selectors.author);
    println!("  Tag: {}", config.selectors.tag);

    println!("\nCrawler:");
    println!("  Batch size: {}", config.crawler.batch_size);
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }
    match config.crawler.connect_timeout_secs {
        Some(secs) => println!("  Connect timeout: {}s", secs),
        None => println!("  Connect timeout: none"),
    }
    println!(
        "  User agent: {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path.display());

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch pages 1..={} in the first round",
        config.crawler.batch_size
    );

    Ok(())
}
