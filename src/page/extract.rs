//! Word and link extraction from HTML documents

use crate::page::ParsedPage;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Parses HTML content into word counts and outbound links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, for resolving relative links
/// * `ignored_words` - Words fully matching any of these are not counted
pub fn extract_page(html: &str, base_url: &Url, ignored_words: &[Regex]) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: count_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words in a plain-text fragment
///
/// Words are maximal alphanumeric runs, lowercased. A word fully matching
/// any ignored pattern contributes nothing.
pub fn word_counts(text: &str, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for raw in text.split(|c: char| !c.is_alphanumeric()) {
        if raw.is_empty() {
            continue;
        }

        let word = raw.to_lowercase();
        if is_ignored(&word, ignored_words) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

fn is_ignored(word: &str, ignored_words: &[Regex]) -> bool {
    ignored_words
        .iter()
        .any(|pattern| matches_fully(pattern, word))
}

/// True when the pattern matches the whole candidate, not a substring
fn matches_fully(pattern: &Regex, candidate: &str) -> bool {
    pattern
        .find(candidate)
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}

/// Collects the visible text of the document and counts its words
///
/// Text inside script and style elements is not page content.
fn count_words(document: &Html, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut text = String::new();

    for node in document.tree.nodes() {
        if let Some(fragment) = node.value().as_text() {
            let skipped = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name()))
                .is_some_and(|name| name == "script" || name == "style");

            if !skipped {
                text.push_str(fragment);
                text.push(' ');
            }
        }
    }

    word_counts(&text, ignored_words)
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
