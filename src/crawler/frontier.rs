//! Frontier for a single traversal
//!
//! This module handles:
//! - FIFO ordering of pending URLs (breadth-first)
//! - The admission set of every URL ever enqueued
//! - The page bound, which caps admissions

use crate::url::canonicalize;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Pending URLs plus the set of URLs ever admitted
///
/// Invariant: `visited_count() <= max_pages`. A URL enters the visited set at
/// the moment it is enqueued and never leaves it.
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched, in admission order
    queue: VecDeque<Url>,

    /// Canonical form of every URL ever admitted
    visited: HashSet<String>,

    /// Maximum number of admissions
    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier seeded with one URL
    ///
    /// The seed is admitted unconditionally; `max_pages` must be at least 1 for
    /// the bound invariant to hold, and is raised to 1 otherwise.
    pub fn new(seed: &Url, max_pages: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            max_pages: max_pages.max(1),
        };
        frontier.admit(seed);
        frontier
    }

    /// Takes the next URL to fetch
    ///
    /// Returns None once the queue is exhausted.
    pub fn next_url(&mut self) -> Option<Url> {
        if self.visited.len() > self.max_pages {
            return None;
        }
        self.queue.pop_front()
    }

    /// Admits a URL if it is new and the bound has room
    ///
    /// The URL is canonicalized first. Insertion into the visited set and the
    /// queue happen together.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was enqueued
    /// * `false` - Already seen, or the bound is reached
    pub fn admit(&mut self, url: &Url) -> bool {
        if self.is_full() {
            return false;
        }

        let canonical = canonicalize(url);
        if !self.visited.insert(canonical.as_str().to_string()) {
            return false;
        }

        self.queue.push_back(canonical);
        true
    }

    /// Returns true if no further URL can be admitted
    pub fn is_full(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Returns true if the URL (in canonical form) was ever admitted
    pub fn has_seen(&self, url: &Url) -> bool {
        self.visited.contains(canonicalize(url).as_str())
    }

    /// Number of URLs ever admitted
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs still waiting
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// The admission bound
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_seed_is_admitted() {
        let mut frontier = Frontier::new(&url("http://example.test/home"), 3);
        assert_eq!(frontier.visited_count(), 1);
        assert_eq!(frontier.pending_count(), 1);
        assert_eq!(
            frontier.next_url().map(|u| u.to_string()),
            Some("http://example.test/home".to_string())
        );
        assert_eq!(frontier.next_url(), None);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 10);
        frontier.next_url();

        assert!(frontier.admit(&url("http://example.test/a")));
        assert!(frontier.admit(&url("http://example.test/b")));
        assert!(frontier.admit(&url("http://example.test/c")));

        let order: Vec<String> = std::iter::from_fn(|| frontier.next_url())
            .map(|u| u.path().to_string())
            .collect();
        assert_eq!(order, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 10);
        assert!(frontier.admit(&url("http://example.test/a")));
        assert!(!frontier.admit(&url("http://example.test/a")));
        assert_eq!(frontier.visited_count(), 2);
    }

    #[test]
    fn test_fragment_variants_are_one_entry() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 10);
        assert!(frontier.admit(&url("http://example.test/a#one")));
        assert!(!frontier.admit(&url("http://example.test/a#two")));
        assert!(!frontier.admit(&url("http://example.test/a")));
        assert!(!frontier.admit(&url("http://example.test/#top")));
        assert!(frontier.has_seen(&url("http://example.test/a#three")));
    }

    #[test]
    fn test_bound_caps_admissions() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 3);
        assert!(frontier.admit(&url("http://example.test/1")));
        assert!(frontier.admit(&url("http://example.test/2")));
        assert!(frontier.is_full());
        assert!(!frontier.admit(&url("http://example.test/3")));
        assert_eq!(frontier.visited_count(), 3);
    }

    #[test]
    fn test_admitted_urls_still_dequeued_after_bound() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 2);
        frontier.next_url();
        assert!(frontier.admit(&url("http://example.test/1")));
        assert!(frontier.is_full());
        assert!(frontier.next_url().is_some());
        assert!(frontier.next_url().is_none());
    }

    #[test]
    fn test_dequeued_url_stays_visited() {
        let mut frontier = Frontier::new(&url("http://example.test/"), 5);
        frontier.next_url();
        assert!(!frontier.admit(&url("http://example.test/")));
    }

    #[test]
    fn test_zero_bound_raised_to_one() {
        let frontier = Frontier::new(&url("http://example.test/"), 0);
        assert_eq!(frontier.max_pages(), 1);
        assert!(frontier.visited_count() <= frontier.max_pages());
    }
}
