//! Output module for writing harvested quotes and run reports
//!
//! This module handles:
//! - Writing quotes to a CSV file with a fixed `text,author,tags` header
//! - Reading such a file back into quotes
//! - Summarizing a finished run

mod csv_output;
pub mod stats;

pub use csv_output::{read_quotes, read_quotes_from, write_quotes, write_quotes_to, CSV_HEADER};
pub use stats::{print_statistics, RunStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tag encoding error: {0}")]
    Tags(#[from] serde_json::Error),

    #[error("Malformed CSV at row {row}: {message}")]
    Format { row: usize, message: String },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
