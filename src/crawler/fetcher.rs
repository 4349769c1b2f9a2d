//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client shared by every request of one harvest
//! - GET requests for listing pages
//! - Classifying failures so they can be reported and downgraded to "no content"

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::url::PageLocator;
use crate::HarvestError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// A source of raw listing pages, addressed by page number
///
/// Implementations never fail: a page that cannot be retrieved is reported
/// as `None`, which the paginator treats like a page without quotes.
pub trait PageSource {
    /// Fetches the raw body of one listing page
    fn fetch_page(&self, page: u32) -> impl Future<Output = Option<Vec<u8>>>;
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: Vec<u8>,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, truncated body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for one harvest
///
/// Format of the user agent: `CrawlerName/Version`. Redirects are followed
/// with reqwest's default policy. Neither a request timeout nor a connect
/// timeout is set unless configured, so by default a request waits for as
/// long as the server takes.
///
/// # Arguments
///
/// * `crawler` - Crawler settings carrying the optional timeouts
/// * `user_agent` - Name and version sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. TLS backend unavailable)
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", user_agent.crawler_name, user_agent.crawler_version);

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = crawler.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(secs) = crawler.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, body read | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError |
/// | Connection refused | NetworkError |
/// | Body read failure | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult carrying the body on success or the kind of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    // Transport failures never reach the status check
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    // Read the whole body; a truncated transfer counts as a network error
    let final_url = response.url().to_string();
    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => classify_network_error(&e),
    }
}

fn classify_network_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}

/// Page source backed by a live HTTP client
///
/// The client owns the connection pool; dropping the fetcher releases every
/// connection it opened.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    locator: PageLocator,
}

impl HttpFetcher {
    /// Creates a fetcher for the configured site
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let locator = PageLocator::new(&config.site.base_url, &config.site.page_path)?;
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        Ok(Self::with_client(client, locator))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, locator: PageLocator) -> Self {
        Self { client, locator }
    }

    pub fn locator(&self) -> &PageLocator {
        &self.locator
    }
}

impl PageSource for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Option<Vec<u8>> {
        let url = match self.locator.page_url(page) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Error fetching page {}: invalid URL: {}", page, e);
                return None;
            }
        };

        tracing::debug!("Fetching page {} from {}", page, url);

        match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(
                    "Page {} answered {} from {} ({} bytes)",
                    page,
                    status_code,
                    final_url,
                    body.len()
                );
                Some(body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Error fetching page {} ({}): HTTP {}", page, url, status_code);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Error fetching page {} ({}): {}", page, url, error);
                None
            }
        }
    }
}
