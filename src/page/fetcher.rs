//! HTTP-backed page parser
//!
//! Fetches a page over HTTP and hands the body to the HTML extractor.
//! All failures are reported per URL; nothing here retries or aborts a
//! wider crawl.

use crate::page::extract::extract_page;
use crate::page::{PageParser, ParsedPage};
use crate::PageError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the crawler's standard configuration
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production [`PageParser`] backed by reqwest and scraper
pub struct HttpPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HttpPageParser {
    /// Creates a parser with a fresh HTTP client
    pub fn new(ignored_words: Vec<Regex>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
            ignored_words,
        })
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, PageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(PageError::ContentType {
                url: url.to_string(),
                content_type,
            });
        }

        // The final URL after redirects is the base for relative links
        let base_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(extract_page(&body, &base_url, &self.ignored_words))
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> PageError {
    if error.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
