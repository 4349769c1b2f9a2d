use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Quotes-Harvest
///
/// Every section is optional; a missing section or key falls back to the
/// values used for the reference site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Where the listing lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base address every page path is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path template for one listing page; `{page}` is replaced by the page number
    #[serde(rename = "page-path")]
    pub page_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com/".to_string(),
            page_path: "/page/{page}/".to_string(),
        }
    }
}

/// CSS selectors describing the markup of one listing page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container matching one quote block
    pub item: String,

    /// Quote text, relative to the container
    pub text: String,

    /// Quote author, relative to the container
    pub author: String,

    /// Zero or more tags, relative to the container
    pub tag: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: ".quote".to_string(),
            text: ".text".to_string(),
            author: ".author".to_string(),
            tag: ".tag".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of pages fetched concurrently per round
    #[serde(rename = "batch-size")]
    pub batch_size: u32,

    /// Per-request timeout in seconds; unset means wait indefinitely
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    /// Connection-establishment timeout in seconds; unset means wait indefinitely
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file receiving the quotes
    #[serde(rename = "csv-path")]
    pub csv_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("quotes.csv"),
        }
    }
}
