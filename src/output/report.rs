//! Terminal rendering of match results and traversal counters

use crate::crawler::{MatchResult, TraversalStats};
use std::fmt::Write;

/// Renders matches as a block of text
///
/// Each match lists its URL, snippet and screenshot path (`-` when none),
/// followed by a separator line.
pub fn format_results(results: &[MatchResult]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Found {} results ===", results.len());
    for result in results {
        let screenshot = result
            .screenshot
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());

        let _ = writeln!(out, "URL: {}", result.url);
        let _ = writeln!(out, "Snippet: {}", result.snippet);
        let _ = writeln!(out, "Screenshot: {}", screenshot);
        let _ = writeln!(out, "---------------------------");
    }

    out
}

/// Renders traversal counters
pub fn format_statistics(stats: &TraversalStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Traversal Statistics ===");
    let _ = writeln!(out, "  Pages admitted: {}", stats.pages_admitted);
    let _ = writeln!(out, "  Pages fetched: {}", stats.pages_fetched);
    let _ = writeln!(out, "  Fetch failures: {}", stats.fetch_failures);
    let _ = writeln!(out, "  Matches: {}", stats.matches);

    let attempted = stats.pages_fetched + stats.fetch_failures;
    let success_rate = if attempted > 0 {
        (stats.pages_fetched as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    let _ = writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} pages fetched)",
        success_rate, stats.pages_fetched, attempted
    );

    out
}

/// Prints matches to stdout
pub fn print_results(results: &[MatchResult]) {
    println!();
    print!("{}", format_results(results));
}

/// Prints traversal counters to stdout
pub fn print_statistics(stats: &TraversalStats) {
    println!();
    print!("{}", format_statistics(stats));
}
