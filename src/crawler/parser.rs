//! HTML parser for extracting quotes from a listing page
//!
//! A page holds zero or more quote blocks matched by the item selector. Each
//! block must contain a text element and an author element, and may contain
//! any number of tags. A page without blocks is how the site signals that
//! the listing has ended.

use crate::config::{parse_selector, SelectorConfig};
use crate::{ConfigError, ExtractError};
use scraper::{ElementRef, Html, Selector};

/// One quote scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quote itself, as rendered on the page
    pub text: String,

    /// Who the quote is attributed to
    pub author: String,

    /// Tags in page order; duplicates are kept
    pub tags: Vec<String>,
}

/// Compiled selectors describing the markup of a listing page
#[derive(Debug, Clone)]
pub struct SelectorSet {
    item: Selector,
    text: Selector,
    author: Selector,
    tag: Selector,
}

impl SelectorSet {
    /// Compiles the configured selectors
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item: parse_selector(&config.item)?,
            text: parse_selector(&config.text)?,
            author: parse_selector(&config.author)?,
            tag: parse_selector(&config.tag)?,
        })
    }
}

/// Extracts every quote from a raw page body
///
/// The body must be UTF-8. Quotes are returned in document order.
///
/// # Example
///
/// ```
/// use quotes_harvest::config::SelectorConfig;
/// use quotes_harvest::crawler::{extract_quotes, SelectorSet};
///
/// let html = br#"<div class="quote">
///     <span class="text">Hello</span>
///     <small class="author">Someone</small>
///     <a class="tag">greeting</a>
/// </div>"#;
/// let selectors = SelectorSet::from_config(&SelectorConfig::default()).unwrap();
/// let quotes = extract_quotes(html, 1, &selectors).unwrap();
/// assert_eq!(quotes[0].author, "Someone");
/// assert_eq!(quotes[0].tags, vec!["greeting"]);
/// ```
pub fn extract_quotes(
    body: &[u8],
    page: u32,
    selectors: &SelectorSet,
) -> Result<Vec<Quote>, ExtractError> {
    // Undecodable bytes mean the page is not the markup we expect
    let html =
        std::str::from_utf8(body).map_err(|source| ExtractError::Encoding { page, source })?;
    parse_quotes(html, page, selectors)
}

/// Extracts every quote from an HTML document
///
/// # Arguments
///
/// * `html` - The document text
/// * `page` - Page number, used only in error reports
/// * `selectors` - Compiled selectors for blocks and their fields
///
/// # Returns
///
/// * `Ok(Vec<Quote>)` - Quotes in document order; empty when no block matches
/// * `Err(ExtractError)` - A block lacks its text or author element
pub fn parse_quotes(
    html: &str,
    page: u32,
    selectors: &SelectorSet,
) -> Result<Vec<Quote>, ExtractError> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.item)
        .enumerate()
        .map(|(item, block)| -> Result<Quote, ExtractError> {
            let text = required_text(block, &selectors.text)
                .ok_or(ExtractError::MissingField {
                    page,
                    item,
                    field: "text",
                })?;
            let author = required_text(block, &selectors.author)
                .ok_or(ExtractError::MissingField {
                    page,
                    item,
                    field: "author",
                })?;
            let tags = block.select(&selectors.tag).map(element_text).collect();

            Ok(Quote { text, author, tags })
        })
        .collect()
}

/// Text of the first element matching `selector` inside `block`
fn required_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
