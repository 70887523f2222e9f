//! Browser-backed fetcher
//!
//! Pages are loaded in a remote browser over WebDriver so that script-built
//! content is present in the source. One session serves a whole traversal.

use crate::config::Browser;
use crate::crawler::consent::{dismiss_consent, CLICK_PAUSE};
use crate::crawler::fetcher::{FetchedPage, PageFetcher};
use crate::{FetchError, FinderError, ScreenshotError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thirtyfour::{DesiredCapabilities, WebDriver};
use url::Url;

/// Default time given to deferred scripts after navigation
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(8);

/// Fetcher that drives a WebDriver session
pub struct RenderedFetcher {
    endpoint: String,
    browser: Browser,
    settle: Duration,
    screenshot_dir: PathBuf,
    driver: Option<WebDriver>,
}

impl RenderedFetcher {
    /// Creates a fetcher; the session is not opened until `open`
    pub fn new(endpoint: String, browser: Browser, settle: Duration, screenshot_dir: PathBuf) -> Self {
        Self {
            endpoint,
            browser,
            settle,
            screenshot_dir,
            driver: None,
        }
    }

    /// Returns true while a session is held
    pub fn has_session(&self) -> bool {
        self.driver.is_some()
    }

    async fn start_session(&self) -> Result<WebDriver, FinderError> {
        let session = match self.browser {
            Browser::Chrome => WebDriver::new(self.endpoint.as_str(), DesiredCapabilities::chrome()).await,
            Browser::Firefox => {
                WebDriver::new(self.endpoint.as_str(), DesiredCapabilities::firefox()).await
            }
        };

        session.map_err(|source| FinderError::Session {
            endpoint: self.endpoint.clone(),
            source,
        })
    }

    async fn try_capture(&self, url: &Url) -> Result<PathBuf, ScreenshotError> {
        let driver = self.driver.as_ref().ok_or(ScreenshotError::NoSession)?;

        let png = driver.screenshot_as_png().await?;

        tokio::fs::create_dir_all(&self.screenshot_dir).await?;
        let path = screenshot_path(&self.screenshot_dir, url);
        tokio::fs::write(&path, png).await?;

        Ok(tokio::fs::canonicalize(&path).await.unwrap_or(path))
    }
}

impl PageFetcher for RenderedFetcher {
    async fn open(&mut self) -> Result<(), FinderError> {
        if self.driver.is_none() {
            tracing::info!("Opening {:?} session at {}", self.browser, self.endpoint);
            self.driver = Some(self.start_session().await?);
        }
        Ok(())
    }

    async fn fetch(&mut self, url: &Url) -> Result<FetchedPage, FetchError> {
        let driver = self.driver.as_ref().ok_or(FetchError::NoSession)?;
        let session_error = |source| FetchError::Session {
            url: url.to_string(),
            source,
        };

        driver.goto(url.as_str()).await.map_err(session_error)?;

        // TODO: replace the fixed settle with a document.readyState / network-idle wait
        tokio::time::sleep(self.settle).await;

        let outcome = dismiss_consent(driver, CLICK_PAUSE).await;
        tracing::debug!("Consent handling on {}: {:?}", url, outcome);

        let html = driver.source().await.map_err(session_error)?;

        Ok(FetchedPage {
            url: url.clone(),
            html,
        })
    }

    async fn capture(&mut self, url: &Url) -> Option<PathBuf> {
        match self.try_capture(url).await {
            Ok(path) => {
                tracing::info!("Screenshot saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("Screenshot failed for {}: {}", url, e);
                None
            }
        }
    }

    async fn close(&mut self) {
        if let Some(driver) = self.driver.take() {
            tracing::info!("Closing browser session");
            if let Err(e) = driver.quit().await {
                tracing::warn!("Failed to quit browser session: {}", e);
            }
        }
    }
}

/// Derives the screenshot file name for a page
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`.
///
/// # Example
///
/// ```
/// use site_word_finder::crawler::screenshot_file_name;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/a?b=1").unwrap();
/// assert_eq!(screenshot_file_name(&url), "screenshot_https___example.com_a_b_1.png");
/// ```
pub fn screenshot_file_name(url: &Url) -> String {
    let safe: String = url
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("screenshot_{}.png", safe)
}

/// Full path a screenshot for `url` would be written to inside `dir`
pub fn screenshot_path(dir: &Path, url: &Url) -> PathBuf {
    dir.join(screenshot_file_name(url))
}
