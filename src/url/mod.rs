//! URL handling module for Site Word Finder
//!
//! This module provides seed normalization, fragment canonicalization and host
//! extraction for scope checks.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{host_of, is_in_scope};
pub use normalize::{canonicalize, normalize_url};
