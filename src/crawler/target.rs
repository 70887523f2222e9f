//! Immutable description of one crawl

use crate::config::{Browser, Config, StrategyKind};
use crate::url::{canonicalize, host_of, normalize_url};
use crate::{ConfigError, FinderError};
use url::Url;

/// How pages are retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Plain HTTP GET
    Static,
    /// Remote browser session at `webdriver_url`
    Rendered {
        webdriver_url: String,
        browser: Browser,
    },
}

impl FetchStrategy {
    /// Returns true for the browser-backed strategy
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// What to crawl and what to look for
///
/// Built once, never mutated.
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    seed: Url,
    scope_host: String,
    phrase: String,
    max_pages: usize,
    strategy: FetchStrategy,
}

impl CrawlTarget {
    /// Creates a target from a raw seed string
    ///
    /// The seed gets a default `http://` scheme when it has none and its
    /// fragment is dropped. The scope host is the seed's host.
    ///
    /// # Errors
    ///
    /// * `FinderError::UrlError` - The seed cannot be parsed
    /// * `FinderError::Config` - The page bound is zero or the phrase is empty
    pub fn new(
        seed: &str,
        phrase: impl Into<String>,
        max_pages: usize,
        strategy: FetchStrategy,
    ) -> Result<Self, FinderError> {
        let phrase = phrase.into();
        if phrase.is_empty() {
            return Err(ConfigError::Validation("target phrase cannot be empty".to_string()).into());
        }
        if max_pages == 0 {
            return Err(ConfigError::Validation("page bound must be positive".to_string()).into());
        }

        let seed = canonicalize(&normalize_url(seed)?);
        let scope_host =
            host_of(&seed).ok_or_else(|| FinderError::MissingHost(seed.to_string()))?;

        Ok(Self {
            seed,
            scope_host,
            phrase,
            max_pages,
            strategy,
        })
    }

    /// Creates a target from validated configuration
    pub fn from_config(config: &Config) -> Result<Self, FinderError> {
        let strategy = match config.fetch.strategy {
            StrategyKind::Static => FetchStrategy::Static,
            StrategyKind::Rendered => FetchStrategy::Rendered {
                webdriver_url: config.fetch.webdriver_url.clone().ok_or_else(|| {
                    ConfigError::Validation(
                        "webdriver_url is required when strategy is 'rendered'".to_string(),
                    )
                })?,
                browser: config.fetch.browser,
            },
        };

        Self::new(
            &config.crawler.seed_url,
            config.crawler.target_phrase.clone(),
            config.crawler.max_pages as usize,
            strategy,
        )
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn scope_host(&self) -> &str {
        &self.scope_host
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn strategy(&self) -> &FetchStrategy {
        &self.strategy
    }
}
