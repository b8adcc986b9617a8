//! End-to-end crawl tests
//!
//! These run the real HTTP page parser and crawl engine against a wiremock
//! server, covering deduplication, depth and skip-pattern enforcement,
//! failure containment, and the ranked output.
//!
//! Anchor elements in the fixtures carry no text so link markup never
//! leaks into the word counts the tests assert on.

use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordfall::crawler::{CrawlEngine, CrawlPolicy};
use wordfall::page::HttpPageParser;

fn policy(max_depth: u32, popular_word_count: usize) -> CrawlPolicy {
    CrawlPolicy {
        timeout: Duration::from_secs(30),
        max_depth,
        popular_word_count,
        skip_patterns: vec![],
        parallelism: 4,
    }
}

fn engine(policy: CrawlPolicy) -> CrawlEngine {
    let parser = HttpPageParser::new(vec![]).expect("Failed to build parser");
    CrawlEngine::new(Arc::new(parser), policy).expect("Failed to build engine")
}

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_counts_and_ranks_words() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <p>crawler crawler engine</p>
            <a href="{base}/page1"></a>
            <a href="{base}/page2"></a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/page1",
        "<html><body><p>crawler words words</p></body></html>".to_string(),
    )
    .await;
    mount_html(
        &server,
        "/page2",
        "<html><body><p>engine words</p></body></html>".to_string(),
    )
    .await;

    let result = engine(policy(2, 3)).crawl(vec![format!("{base}/")]).await;

    assert_eq!(result.urls_visited, 3);
    assert_eq!(
        result.word_counts,
        vec![
            ("crawler".to_string(), 3),
            ("words".to_string(), 3),
            ("engine".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_same_page_reached_twice_is_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/left"></a>
            <a href="{base}/right"></a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/left",
        format!(r#"<html><body><a href="{base}/shared"></a></body></html>"#),
    )
    .await;
    mount_html(
        &server,
        "/right",
        format!(r#"<html><body><a href="{base}/shared"></a></body></html>"#),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>once</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = engine(policy(3, 10)).crawl(vec![format!("{base}/")]).await;

    assert_eq!(result.urls_visited, 4);
    assert_eq!(result.word_counts, vec![("once".to_string(), 1)]);
    // MockServer verifies the expect(1) on drop
}

#[tokio::test]
async fn test_depth_bound_cuts_off_chain() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(r#"<html><body><a href="{base}/a"></a></body></html>"#),
    )
    .await;
    mount_html(
        &server,
        "/a",
        format!(r#"<html><body><a href="{base}/b"></a></body></html>"#),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let result = engine(policy(2, 10)).crawl(vec![format!("{base}/")]).await;

    assert_eq!(result.urls_visited, 2);
}

#[tokio::test]
async fn test_skip_pattern_excludes_matching_urls() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <p>kept</p>
            <a href="{base}/public"></a>
            <a href="{base}/secret"></a>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/public",
        "<html><body>kept</body></html>".to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let mut pol = policy(2, 10);
    pol.skip_patterns = vec![Regex::new(&format!("^{}/secret$", regex::escape(&base))).unwrap()];

    let result = engine(pol).crawl(vec![format!("{base}/")]).await;

    // The skipped URL is neither fetched nor counted as visited
    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, vec![("kept".to_string(), 2)]);
}

#[tokio::test]
async fn test_dead_link_is_contained() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <p>alive</p>
            <a href="{base}/missing"></a>
            </body></html>"#
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = engine(policy(2, 10)).crawl(vec![format!("{base}/")]).await;

    // The 404 URL still counts as visited but contributes nothing
    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, vec![("alive".to_string(), 1)]);
}

#[tokio::test]
async fn test_non_html_content_contributes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <p>page</p>
            <a href="{base}/data.json"></a>
            </body></html>"#
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"not": "words"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let result = engine(policy(2, 10)).crawl(vec![format!("{base}/")]).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, vec![("page".to_string(), 1)]);
}

#[tokio::test]
async fn test_ignored_words_are_not_counted() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        "<html><body><p>the cat and the dormouse</p></body></html>".to_string(),
    )
    .await;

    let parser = HttpPageParser::new(vec![Regex::new("^.{1,3}$").unwrap()])
        .expect("Failed to build parser");
    let engine =
        CrawlEngine::new(Arc::new(parser), policy(1, 10)).expect("Failed to build engine");

    let result = engine.crawl(vec![format!("{base}/")]).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(result.word_counts, vec![("dormouse".to_string(), 1)]);
}

#[tokio::test]
async fn test_relative_links_resolve_against_the_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/docs/",
        r#"<html><body><a href="guide"></a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &server,
        "/docs/guide",
        "<html><body>reached</body></html>".to_string(),
    )
    .await;

    let result = engine(policy(2, 10))
        .crawl(vec![format!("{base}/docs/")])
        .await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, vec![("reached".to_string(), 1)]);
}
