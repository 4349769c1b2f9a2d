//! Crawler coordinator - batched pagination traversal
//!
//! The listing's page count is unknown up front. Pages are therefore fetched
//! in fixed-size rounds: every page of a round is fetched and parsed
//! concurrently, and the round's results are only inspected once all of its
//! pages have finished. A round in which every page came back empty marks the
//! end of the listing.

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageSource};
use crate::crawler::parser::{extract_quotes, Quote, SelectorSet};
use crate::{ExtractError, HarvestError};
use futures::future::join_all;
use std::ops::Range;

/// Counters collected while traversing a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Rounds dispatched, including the final empty one
    pub rounds: u32,

    /// Pages requested across all rounds
    pub pages_requested: u32,

    /// Pages that yielded at least one quote
    pub pages_with_quotes: u32,

    /// Pages that yielded nothing (no quote blocks or a failed fetch)
    pub empty_pages: u32,

    /// Quotes collected
    pub quotes: usize,
}

/// Walks a paginated listing in concurrent rounds of `batch_size` pages
///
/// Returns every quote from page 1 up to the first round in which all pages
/// came back empty, ordered by page number and by document order within a
/// page. Completion order of the concurrent fetches never affects the
/// result. A `batch_size` of 0 is treated as 1.
///
/// A page whose fetch failed contributes nothing. A page whose markup does
/// not match the selectors aborts the traversal with the error of the
/// lowest-numbered offending page of the round.
///
/// # Arguments
///
/// * `source` - Where pages come from
/// * `selectors` - Compiled selectors used on every page
/// * `batch_size` - Pages dispatched concurrently per round
///
/// # Returns
///
/// * `Ok((quotes, stats))` - All quotes in page order and the traversal counters
/// * `Err(ExtractError)` - A fetched page did not match the expected markup
pub async fn traverse<S: PageSource>(
    source: &S,
    selectors: &SelectorSet,
    batch_size: u32,
) -> Result<(Vec<Quote>, TraversalStats), ExtractError> {
    let batch_size = batch_size.max(1);
    let mut quotes = Vec::new();
    let mut stats = TraversalStats::default();
    let mut cursor: u32 = 1;

    loop {
        // Dispatch the whole round and wait for every page of it
        let batch = page_batch(cursor, batch_size);
        tracing::debug!("Dispatching pages {}..{}", batch.start, batch.end);

        let results = join_all(batch.clone().map(|page| scrape_page(source, selectors, page))).await;

        stats.rounds += 1;
        stats.pages_requested += batch.len() as u32;

        // Results are in page order, so the first error is the lowest page
        let pages = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        // A round with nothing on any page marks the end of the listing
        if pages.iter().all(Vec::is_empty) {
            stats.empty_pages += pages.len() as u32;
            tracing::info!(
                "Pages {}..{} are all empty, pagination ended",
                batch.start,
                batch.end
            );
            break;
        }

        for page_quotes in pages {
            if page_quotes.is_empty() {
                stats.empty_pages += 1;
            } else {
                stats.pages_with_quotes += 1;
            }
            quotes.extend(page_quotes);
        }

        tracing::info!(
            "Round {} done: {} quotes collected so far",
            stats.rounds,
            quotes.len()
        );

        cursor = match cursor.checked_add(batch_size) {
            Some(next) => next,
            None => {
                tracing::warn!("Page counter exhausted after page {}", batch.end - 1);
                break;
            }
        };
    }

    stats.quotes = quotes.len();
    Ok((quotes, stats))
}

/// Page numbers of the round starting at `cursor`
fn page_batch(cursor: u32, batch_size: u32) -> Range<u32> {
    cursor..cursor.saturating_add(batch_size)
}

/// Fetches one page and extracts its quotes
async fn scrape_page<S: PageSource>(
    source: &S,
    selectors: &SelectorSet,
    page: u32,
) -> Result<Vec<Quote>, ExtractError> {
    let body = match source.fetch_page(page).await {
        Some(body) if !body.is_empty() => body,
        _ => return Ok(Vec::new()),
    };

    let quotes = extract_quotes(&body, page, selectors)?;
    if !quotes.is_empty() {
        tracing::info!("Successfully scraped page {}", page);
    }
    Ok(quotes)
}

/// Harvests every quote from the configured site
///
/// Builds one HTTP client for the whole traversal and releases it when the
/// traversal ends, whether it succeeded or not.
///
/// # Arguments
///
/// * `config` - Site, selectors, batch size and client settings
///
/// # Returns
///
/// * `Ok((quotes, stats))` - Every quote of the listing and the traversal counters
/// * `Err(HarvestError)` - Invalid selectors or URL, client setup failure, or broken markup
///
/// # Example
///
/// ```no_run
/// use quotes_harvest::config::Config;
/// use quotes_harvest::crawler::harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (quotes, stats) = harvest(&Config::default()).await?;
/// println!("{} quotes from {} pages", quotes.len(), stats.pages_with_quotes);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: &Config) -> Result<(Vec<Quote>, TraversalStats), HarvestError> {
    // Compile selectors before any request goes out
    let selectors = SelectorSet::from_config(&config.selectors)?;
    let fetcher = HttpFetcher::new(config)?;

    tracing::info!(
        "Harvesting {} in rounds of {} pages",
        fetcher.locator().base(),
        config.crawler.batch_size
    );

    let (quotes, stats) = traverse(&fetcher, &selectors, config.crawler.batch_size).await?;
    // The fetcher and its connection pool are dropped here
    Ok((quotes, stats))
}
