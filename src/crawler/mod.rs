//! Crawler module for page fetching, matching and traversal
//!
//! This module contains the core crawling logic, including:
//! - Static and browser-rendered page fetching
//! - Consent banner dismissal for rendered pages
//! - Link extraction and frontier management
//! - Phrase matching and snippet extraction
//! - Overall traversal coordination

mod consent;
mod coordinator;
mod fetcher;
mod frontier;
mod matcher;
mod parser;
mod rendered;
mod target;

pub use consent::{
    dismiss_consent, ConsentLocator, ConsentOutcome, ConsentSurface, CONSENT_LOCATORS,
};
pub use coordinator::{run_crawl, Finder, MatchResult, TraversalStats};
pub use fetcher::{build_http_client, fetch_url, FetchedPage, Fetcher, PageFetcher, StaticFetcher};
pub use frontier::Frontier;
pub use matcher::{contains_phrase, find_snippet, visible_text, SNIPPET_CONTEXT_CHARS};
pub use parser::extract_links;
pub use rendered::{screenshot_file_name, screenshot_path, RenderedFetcher, DEFAULT_SETTLE};
pub use target::{CrawlTarget, FetchStrategy};
