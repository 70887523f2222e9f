//! Page fetching
//!
//! This module defines the fetch capability the crawler depends on and its two
//! implementations:
//! - `StaticFetcher`: a plain HTTP GET, no script execution
//! - `RenderedFetcher`: a WebDriver-controlled browser (see `rendered`)
//!
//! `Fetcher` is the tagged variant selected from configuration.

use crate::config::{Config, UserAgentConfig};
use crate::crawler::rendered::RenderedFetcher;
use crate::crawler::target::FetchStrategy;
use crate::{FetchError, FinderError};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// A fetched document
///
/// Transient: consumed by matching and link extraction, then dropped.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: Url,
    /// Raw HTML as returned by the server or rendered by the browser
    pub html: String,
}

/// Capability to retrieve pages for the crawler
///
/// `open` is called once before the first fetch and `close` exactly once after
/// the last one, whatever ended the traversal.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Acquires any resource the fetcher needs for a traversal
    async fn open(&mut self) -> Result<(), FinderError> {
        Ok(())
    }

    /// Retrieves one page
    async fn fetch(&mut self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// Captures an image of the page currently loaded, if the fetcher can
    ///
    /// Best effort: failures come back as `None`.
    async fn capture(&mut self, _url: &Url) -> Option<PathBuf> {
        None
    }

    /// Releases whatever `open` acquired
    async fn close(&mut self) {}
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```
/// use site_word_finder::config::UserAgentConfig;
/// use site_word_finder::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a plain GET
///
/// # Failure Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `FetchError::Timeout` |
/// | Connection / transport failure | `FetchError::Http` |
/// | Non-2xx status | `FetchError::Status` |
/// | Content-Type that is neither text nor XML | `FetchError::ContentMismatch` |
///
/// A missing Content-Type header is accepted.
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_markup_content_type(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let html = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        url: url.clone(),
        html,
    })
}

/// Returns true for content types an HTML parser can make sense of
fn is_markup_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.is_empty() || content_type.starts_with("text/") || content_type.contains("xml")
}

fn classify_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}

/// Plain HTTP fetcher
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a fetcher with its own HTTP client
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<FetchedPage, FetchError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetch strategy chosen at construction time
pub enum Fetcher {
    Static(StaticFetcher),
    Rendered(RenderedFetcher),
}

impl Fetcher {
    /// Builds the fetcher for a strategy
    ///
    /// No network activity happens here; a browser session is only opened when
    /// the traversal starts.
    pub fn new(strategy: &FetchStrategy, config: &Config) -> Result<Self, FinderError> {
        match strategy {
            FetchStrategy::Static => {
                let timeout = Duration::from_secs(config.fetch.timeout_secs);
                Ok(Self::Static(StaticFetcher::new(&config.user_agent, timeout)?))
            }
            FetchStrategy::Rendered {
                webdriver_url,
                browser,
            } => Ok(Self::Rendered(RenderedFetcher::new(
                webdriver_url.clone(),
                *browser,
                Duration::from_millis(config.fetch.settle_ms),
                PathBuf::from(&config.output.screenshot_dir),
            ))),
        }
    }
}

impl PageFetcher for Fetcher {
    async fn open(&mut self) -> Result<(), FinderError> {
        match self {
            Self::Static(fetcher) => fetcher.open().await,
            Self::Rendered(fetcher) => fetcher.open().await,
        }
    }

    async fn fetch(&mut self, url: &Url) -> Result<FetchedPage, FetchError> {
        match self {
            Self::Static(fetcher) => fetcher.fetch(url).await,
            Self::Rendered(fetcher) => fetcher.fetch(url).await,
        }
    }

    async fn capture(&mut self, url: &Url) -> Option<PathBuf> {
        match self {
            Self::Static(fetcher) => fetcher.capture(url).await,
            Self::Rendered(fetcher) => fetcher.capture(url).await,
        }
    }

    async fn close(&mut self) {
        match self {
            Self::Static(fetcher) => fetcher.close().await,
            Self::Rendered(fetcher) => fetcher.close().await,
        }
    }
}
