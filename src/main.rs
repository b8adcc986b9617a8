//! Wordfall main entry point
//!
//! Command-line interface for the parallel word-frequency web crawler.

use anyhow::Context;
use clap::Parser;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wordfall::config::{load_config_with_hash, CrawlConfig};
use wordfall::crawler::{CrawlEngine, CrawlPolicy};
use wordfall::output::{render_result, write_result};
use wordfall::page::HttpPageParser;
use wordfall::profile::{ProfiledPageParser, Profiler};

/// Wordfall: a parallel word-frequency web crawler
///
/// Crawls the configured seed pages to a bounded link depth within a
/// wall-clock deadline and reports the most popular words found, along
/// with the number of distinct pages visited.
#[derive(Parser, Debug)]
#[command(name = "wordfall")]
#[command(version = "1.0.0")]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to JSON configuration file
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

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordfall=info,warn"),
            1 => EnvFilter::new("wordfall=debug,info"),
            2 => EnvFilter::new("wordfall=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Wordfall Dry Run ===\n");

    println!("Crawl bounds:");
    println!("  Max depth: {}", config.max_depth);
    println!("  Timeout: {}s", config.timeout_seconds);
    println!("  Popular word count: {}", config.popular_word_count);
    match config.parallelism {
        Some(n) => println!("  Parallelism: {}", n),
        None => println!("  Parallelism: host concurrency"),
    }

    println!("\nSeed URLs ({}):", config.start_pages.len());
    for seed in &config.start_pages {
        println!("  - {}", seed);
    }

    println!("\nIgnored URL patterns ({}):", config.ignored_urls.len());
    for pattern in &config.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", config.ignored_words.len());
    for pattern in &config.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.result_path.as_deref().unwrap_or("(stdout)")
    );
    println!(
        "  Profile: {}",
        config.profile_output_path.as_deref().unwrap_or("(stdout)")
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let ignored_words = config
        .ignored_words
        .iter()
        .map(|pattern| Regex::new(pattern))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to compile ignored word patterns")?;

    let http_parser =
        HttpPageParser::new(ignored_words).context("failed to build the HTTP client")?;

    let profiler = Arc::new(Profiler::new());
    let parser = Arc::new(ProfiledPageParser::new(
        Arc::new(http_parser),
        Arc::clone(&profiler),
    ));

    let policy = CrawlPolicy::from_config(&config)?;
    let engine = CrawlEngine::new(parser, policy)?;
    tracing::info!(
        "Crawling with effective parallelism {}",
        engine.effective_parallelism()
    );

    let crawl_started = Instant::now();
    let result = engine.crawl(config.start_pages.clone()).await;
    profiler.record("CrawlEngine::crawl", crawl_started.elapsed());

    match config.result_path.as_deref() {
        Some(path) => {
            write_result(&result, Path::new(path))?;
            tracing::info!("Result written to {}", path);
        }
        None => println!("{}", render_result(&result)?),
    }

    match config.profile_output_path.as_deref() {
        Some(path) => {
            profiler.append_report(Path::new(path))?;
            tracing::info!("Profile data appended to {}", path);
        }
        None => {
            let mut stdout = std::io::stdout();
            profiler.write_report(&mut stdout)?;
        }
    }

    Ok(())
}
