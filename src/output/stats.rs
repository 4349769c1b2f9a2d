//! Statistics for a finished harvest
//!
//! This module combines the traversal counters with timing and output
//! details, and renders them for the terminal.

use crate::crawler::TraversalStats;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one completed run
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the harvest started
    pub started_at: DateTime<Utc>,

    /// When the CSV file was written
    pub finished_at: DateTime<Utc>,

    /// Where the quotes were written
    pub output_path: PathBuf,

    /// Rows written, excluding the header
    pub quotes_written: usize,

    /// Counters from the pagination traversal
    pub traversal: TraversalStats,
}

impl RunStatistics {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Average quotes per page that had content
    pub fn quotes_per_page(&self) -> f64 {
        if self.traversal.pages_with_quotes == 0 {
            return 0.0;
        }
        self.quotes_written as f64 / self.traversal.pages_with_quotes as f64
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!(
        "  Duration: {:.2}s",
        stats.duration().num_milliseconds() as f64 / 1000.0
    );
    println!();

    println!("Pagination:");
    println!("  Rounds dispatched: {}", stats.traversal.rounds);
    println!("  Pages requested: {}", stats.traversal.pages_requested);
    println!("  Pages with quotes: {}", stats.traversal.pages_with_quotes);
    println!("  Empty or failed pages: {}", stats.traversal.empty_pages);
    println!();

    println!("Output:");
    println!("  File: {}", stats.output_path.display());
    println!(
        "  Quotes written: {} ({:.1} per page)",
        stats.quotes_written,
        stats.quotes_per_page()
    );
}
