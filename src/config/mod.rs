//! Configuration module for Quotes-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default matching the reference quotes site, so the
//! crawler also runs without any configuration file.
//!
//! # Example
//!
//! ```no_run
//! use quotes_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Pages per round: {}", config.crawler.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MAX_BATCH_SIZE};

pub(crate) use validation::parse_selector;
