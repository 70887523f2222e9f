//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of one traversal (idle, running, done)

mod crawl_state;

pub use crawl_state::CrawlState;
