//! Configuration module for Site Word Finder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site_word_finder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("finder.toml")).unwrap();
//! println!("Looking for: {}", config.crawler.target_phrase);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Browser, Config, CrawlerConfig, FetchConfig, OutputConfig, StrategyKind, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
