//! URL handling module for Quotes-Harvest
//!
//! Listing pages are addressed by number. This module turns a page number
//! into an absolute URL by filling in the page path template and resolving
//! it against the site's base address.

use url::Url;

/// Placeholder replaced by the page number in a page path template
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Resolves page numbers to listing URLs
#[derive(Debug, Clone)]
pub struct PageLocator {
    base: Url,
    page_path: String,
}

impl PageLocator {
    /// Creates a locator from a base address and a page path template
    ///
    /// The template is checked by resolving page 1, so a locator that was
    /// built successfully resolves every page number.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute address of the site
    /// * `page_path` - Path template containing `{page}`
    ///
    /// # Returns
    ///
    /// * `Ok(PageLocator)` - Both parts resolve to a valid page URL
    /// * `Err(url::ParseError)` - The base or the resolved page 1 URL is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use quotes_harvest::url::PageLocator;
    ///
    /// let locator = PageLocator::new("https://quotes.toscrape.com/", "/page/{page}/").unwrap();
    /// assert_eq!(
    ///     locator.page_url(3).unwrap().as_str(),
    ///     "https://quotes.toscrape.com/page/3/"
    /// );
    /// ```
    pub fn new(base_url: &str, page_path: &str) -> Result<Self, url::ParseError> {
        let locator = Self {
            base: Url::parse(base_url)?,
            page_path: page_path.to_string(),
        };
        // Resolving one page is enough to catch a malformed template
        locator.page_url(1)?;
        Ok(locator)
    }

    /// Returns the absolute URL of a listing page
    ///
    /// An absolute template path replaces the base path, a relative one is
    /// resolved against it.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number substituted for `{page}`
    pub fn page_url(&self, page: u32) -> Result<Url, url::ParseError> {
        let path = self
            .page_path
            .replace(PAGE_PLACEHOLDER, &page.to_string());
        self.base.join(&path)
    }

    /// The base address pages are resolved against
    pub fn base(&self) -> &Url {
        &self.base
    }
}
