//! Site Word Finder main entry point
//!
//! This is the command-line interface for the single-host phrase crawler.

use anyhow::Context;
use clap::Parser;
use site_word_finder::config::{load_config_with_hash, Config, StrategyKind};
use site_word_finder::crawler::Finder;
use site_word_finder::output::{print_results, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site Word Finder: search one website for a phrase
///
/// Crawls breadth-first from a seed URL, stays on the seed's host, and reports
/// every page containing the target phrase with a snippet and, when pages are
/// rendered in a browser, a screenshot.
#[derive(Parser, Debug)]
#[command(name = "site-word-finder")]
#[command(version = "1.0.0")]
#[command(about = "Search one website for a phrase", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Print traversal statistics after the results
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_find(&config, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_word_finder=info,warn"),
            1 => EnvFilter::new("site_word_finder=debug,info"),
            2 => EnvFilter::new("site_word_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Site Word Finder Dry Run ===\n");

    println!("Crawler:");
    println!("  Seed: {}", config.crawler.seed_url);
    println!("  Phrase: {:?}", config.crawler.target_phrase);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nFetch:");
    match config.fetch.strategy {
        StrategyKind::Static => {
            println!("  Strategy: static");
            println!("  Timeout: {}s", config.fetch.timeout_secs);
        }
        StrategyKind::Rendered => {
            println!("  Strategy: rendered ({:?})", config.fetch.browser);
            println!(
                "  WebDriver: {}",
                config.fetch.webdriver_url.as_deref().unwrap_or("-")
            );
            println!("  Settle: {}ms", config.fetch.settle_ms);
            println!("  Screenshots: {}", config.output.screenshot_dir);
        }
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
}

/// Handles the main search
async fn handle_find(config: &Config, show_stats: bool) -> anyhow::Result<()> {
    let mut finder = Finder::new(config).context("failed to set up the search")?;

    let results = match finder.find().await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Err(e.into());
        }
    };

    print_results(&results);
    if show_stats {
        print_statistics(&finder.stats());
    }

    Ok(())
}
