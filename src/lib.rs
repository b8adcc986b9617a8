//! Wordfall: a parallel word-frequency web crawler
//!
//! This crate crawls a set of seed pages to a bounded link depth within a
//! wall-clock deadline, deduplicating visited URLs across concurrent tasks
//! and aggregating word frequencies into a deterministic top-K ranking.

pub mod config;
pub mod crawler;
pub mod output;
pub mod page;
pub mod profile;
pub mod ranking;

use thiserror::Error;

/// Main error type for wordfall operations
#[derive(Debug, Error)]
pub enum WordfallError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern in config: {0}")]
    InvalidPattern(String),
}

/// Construction-time contract violations for the crawl engine
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Crawl timeout must be positive")]
    NonPositiveTimeout,

    #[error("Parallelism must be at least 1")]
    ZeroParallelism,

    #[error("Invalid skip pattern '{pattern}': {message}")]
    InvalidSkipPattern { pattern: String, message: String },
}

/// Per-URL errors from the page parser
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML for {url}, got {content_type}")]
    ContentType { url: String, content_type: String },
}

/// Result type alias for wordfall operations
pub type Result<T> = std::result::Result<T, WordfallError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlEngine, CrawlPolicy};
pub use output::CrawlResult;
pub use page::{HttpPageParser, PageParser, ParsedPage};
pub use ranking::rank;
