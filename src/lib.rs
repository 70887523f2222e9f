//! Site Word Finder: a bounded, single-host phrase crawler
//!
//! This crate walks one website breadth-first from a seed URL, looks for a target
//! phrase on every page it fetches, and reports each matching page with a text
//! snippet and, when pages are rendered in a real browser, a screenshot.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;
use thirtyfour::error::WebDriverError;

/// Main error type for Site Word Finder operations
///
/// Only construction-time failures surface through this type. Everything that
/// goes wrong while a traversal is running is recovered per page.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to start browser session at {endpoint}: {source}")]
    Session {
        endpoint: String,
        source: WebDriverError,
    },

    #[error("Seed URL has no host: {0}")]
    MissingHost(String),

    #[error("Traversal already finished; build a new finder to crawl again")]
    AlreadyFinished,

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Per-page fetch failures
///
/// The crawler logs these and moves on to the next queued URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Unsupported content type '{content_type}' for {url}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Browser session error for {url}: {source}")]
    Session { url: String, source: WebDriverError },

    #[error("No browser session is open")]
    NoSession,
}

/// Screenshot capture failures
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("Capture failed: {0}")]
    Capture(#[from] WebDriverError),

    #[error("Failed to write screenshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("No browser session is open")]
    NoSession,
}

/// Consent-banner dismissal failures
///
/// These never leave the dismissal procedure; they exist so the failure can be logged.
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("Consent locator {locator} failed: {message}")]
    Locator { locator: String, message: String },

    #[error("Overlay removal script failed: {0}")]
    Script(String),
}

/// Result type alias for Site Word Finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Finder, MatchResult};
pub use state::CrawlState;
pub use url::{canonicalize, host_of, normalize_url};
