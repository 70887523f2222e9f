use crate::crawler::{StaticFetcher, DEFAULT_SETTLE};
use serde::Deserialize;

/// Main configuration structure for Site Word Finder
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to crawl and what to look for
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Where the traversal starts; the scheme is optional
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Phrase searched for on every page, case-insensitively
    #[serde(rename = "target-phrase")]
    pub target_phrase: String,

    /// Maximum number of URLs ever admitted to the frontier
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

/// How pages are retrieved
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Static fetch timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time given to scripts after navigation, in milliseconds
    #[serde(rename = "settle-ms", default = "default_settle_ms")]
    pub settle_ms: u64,

    /// WebDriver endpoint, required by the rendered strategy
    #[serde(rename = "webdriver-url", default)]
    pub webdriver_url: Option<String>,

    #[serde(default)]
    pub browser: Browser,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            timeout_secs: default_timeout_secs(),
            settle_ms: default_settle_ms(),
            webdriver_url: None,
            browser: Browser::default(),
        }
    }
}

/// Fetch strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Plain HTTP GET, no script execution
    #[default]
    Static,
    /// Real browser driven over WebDriver
    Rendered,
}

/// Browser requested when opening a WebDriver session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; CrawlerName/Version)`
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{})",
            self.crawler_name, self.crawler_version
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory screenshots are written to
    #[serde(rename = "screenshot-dir", default = "default_screenshot_dir")]
    pub screenshot_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    StaticFetcher::DEFAULT_TIMEOUT.as_secs()
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE.as_millis() as u64
}

fn default_crawler_name() -> String {
    "SiteWordFinder".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

fn default_screenshot_dir() -> String {
    ".".to_string()
}
