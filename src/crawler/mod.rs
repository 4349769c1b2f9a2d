//! Crawler module for fetching and scraping listing pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that downgrades failures to "no content"
//! - HTML parsing into quote records
//! - Batched pagination with end-of-listing detection

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{harvest, traverse, TraversalStats};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageSource};
pub use parser::{extract_quotes, parse_quotes, Quote, SelectorSet};
