//! Page parsing capability
//!
//! The crawl engine consumes pages through the [`PageParser`] trait: one
//! call per URL yielding the page's word counts and outbound links. The
//! production implementation fetches over HTTP and parses HTML; tests and
//! embedders can substitute their own.

mod extract;
mod fetcher;

pub use extract::{extract_page, word_counts};
pub use fetcher::{build_http_client, HttpPageParser};

use crate::PageError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Word counts and outbound links extracted from a single page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Occurrence count per word found on the page
    pub word_counts: HashMap<String, u64>,

    /// Outbound link URLs discovered on the page (absolute)
    pub links: Vec<String>,
}

/// Supplies word counts and outbound links for a URL
///
/// Implementations may block on network I/O. Failures are per-URL: callers
/// treat an `Err` as "no words, no links" for that page and carry on.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetch and parse the page at `url`
    async fn parse(&self, url: &str) -> Result<ParsedPage, PageError>;
}
