//! Output module for presenting search results
//!
//! Results only live in memory; this module renders them for the terminal.

mod report;

pub use report::{format_results, format_statistics, print_results, print_statistics};
