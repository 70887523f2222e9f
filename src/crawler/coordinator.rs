//! Crawl coordinator - traversal orchestration
//!
//! This module contains the main crawl loop, which:
//! - Owns the frontier for one traversal
//! - Runs fetch, match and link extraction for each dequeued page
//! - Opens and closes the fetcher around the traversal
//! - Collects match results

use crate::config::Config;
use crate::crawler::fetcher::{FetchedPage, Fetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::matcher::{contains_phrase, find_snippet};
use crate::crawler::parser::extract_links;
use crate::crawler::target::CrawlTarget;
use crate::state::CrawlState;
use crate::FinderError;
use std::path::PathBuf;
use std::time::Instant;
use url::Url;

/// A page that contains the target phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The page URL
    pub url: Url,
    /// Text around the first occurrence; empty if the phrase only appears in markup
    pub snippet: String,
    /// Screenshot of the rendered page, when one was taken
    pub screenshot: Option<PathBuf>,
}

/// Counters for one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// URLs ever admitted to the frontier, seed included
    pub pages_admitted: usize,
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Pages skipped because the fetch failed
    pub fetch_failures: usize,
    /// Pages containing the phrase
    pub matches: usize,
}

/// Single-host phrase finder
///
/// Generic over the fetcher so tests can substitute their own; production code
/// uses [`Fetcher`], built from configuration.
pub struct Finder<F: PageFetcher = Fetcher> {
    target: CrawlTarget,
    fetcher: F,
    state: CrawlState,
    stats: TraversalStats,
}

impl Finder<Fetcher> {
    /// Creates a finder from configuration
    ///
    /// # Errors
    ///
    /// Fails if the seed URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FinderError> {
        let target = CrawlTarget::from_config(config)?;
        let fetcher = Fetcher::new(target.strategy(), config)?;
        Ok(Self::with_fetcher(target, fetcher))
    }
}

impl<F: PageFetcher> Finder<F> {
    /// Creates a finder around an existing fetcher
    pub fn with_fetcher(target: CrawlTarget, fetcher: F) -> Self {
        Self {
            target,
            fetcher,
            state: CrawlState::Idle,
            stats: TraversalStats::default(),
        }
    }

    pub fn target(&self) -> &CrawlTarget {
        &self.target
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Counters from the finished traversal
    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Gives the fetcher back, e.g. to inspect a test double
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }

    /// Runs the traversal and returns every matching page in visit order
    ///
    /// Per-page failures are logged and skipped. The only errors are a failure
    /// to open the fetcher (e.g. no browser session) and calling `find` twice.
    pub async fn find(&mut self) -> Result<Vec<MatchResult>, FinderError> {
        self.transition(CrawlState::Running)?;

        if let Err(e) = self.fetcher.open().await {
            tracing::error!("Failed to open fetcher: {}", e);
            self.transition(CrawlState::Done)?;
            return Err(e);
        }

        let results = self.traverse().await;

        self.fetcher.close().await;
        self.transition(CrawlState::Done)?;

        Ok(results)
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), FinderError> {
        if self.state.is_terminal() && next == CrawlState::Running {
            return Err(FinderError::AlreadyFinished);
        }
        if !self.state.can_transition_to(next) {
            return Err(FinderError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Finder state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Breadth-first loop over the frontier
    async fn traverse(&mut self) -> Vec<MatchResult> {
        let mut frontier = Frontier::new(self.target.seed(), self.target.max_pages());
        let mut results = Vec::new();
        let mut stats = TraversalStats::default();
        let start_time = Instant::now();

        tracing::info!(
            "Searching {} for {:?} (max {} pages)",
            self.target.seed(),
            self.target.phrase(),
            self.target.max_pages()
        );

        while let Some(url) = frontier.next_url() {
            tracing::info!("[Crawl] {}", url);

            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Error fetching {}: {}", url, e);
                    stats.fetch_failures += 1;
                    continue;
                }
            };
            stats.pages_fetched += 1;

            if let Some(result) = self.match_page(&page).await {
                tracing::info!(" --> Phrase found in: {}", result.url);
                results.push(result);
            }

            let admitted = admit_links(&mut frontier, &page, self.target.scope_host());
            tracing::debug!(
                "{} new links from {}, {} pending, {}/{} admitted",
                admitted,
                url,
                frontier.pending_count(),
                frontier.visited_count(),
                frontier.max_pages()
            );
        }

        stats.pages_admitted = frontier.visited_count();
        stats.matches = results.len();
        self.stats = stats;

        tracing::info!(
            "Traversal finished: {} fetched, {} failed, {} matched in {:?}",
            stats.pages_fetched,
            stats.fetch_failures,
            stats.matches,
            start_time.elapsed()
        );

        results
    }

    /// Builds a match result if the page contains the phrase
    async fn match_page(&mut self, page: &FetchedPage) -> Option<MatchResult> {
        let phrase = self.target.phrase();
        if !contains_phrase(&page.html, phrase) {
            return None;
        }

        let snippet = find_snippet(&page.html, phrase);
        if snippet.is_empty() {
            tracing::warn!(
                "Phrase present in markup of {} but not in its visible text",
                page.url
            );
        }

        let screenshot = self.fetcher.capture(&page.url).await;

        Some(MatchResult {
            url: page.url.clone(),
            snippet,
            screenshot,
        })
    }
}

/// Feeds in-scope links of a page into the frontier
///
/// Returns the number of URLs admitted.
fn admit_links(frontier: &mut Frontier, page: &FetchedPage, scope_host: &str) -> usize {
    let mut admitted = 0;
    for link in extract_links(&page.html, &page.url, scope_host) {
        if frontier.is_full() {
            break;
        }
        if frontier.admit(&link) {
            admitted += 1;
        }
    }
    admitted
}

/// Runs a complete search from configuration
///
/// # Example
///
/// ```no_run
/// use site_word_finder::config::load_config;
/// use site_word_finder::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("finder.toml"))?;
/// let results = run_crawl(&config).await?;
/// println!("{} matches", results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<Vec<MatchResult>, FinderError> {
    let mut finder = Finder::new(config)?;
    finder.find().await
}
