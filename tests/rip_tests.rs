//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve HTML fixtures and exercise the full
//! fetch → rip → report path end-to-end.

use pageripper::config::FetcherConfig;
use pageripper::fetch::{build_http_client, fetch_target};
use pageripper::storage::USAGE_KEY;
use pageripper::{rip, CounterStore, ScrapeReport, SqliteCounterStore};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `html` at `/page` on a fresh mock server and returns the target URL
async fn serve_page(server: &MockServer, html: &str) -> Url {
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;

    Url::parse(&format!("{}/page", server.uri())).expect("Failed to build target URL")
}

/// Fetches the target and runs the pipeline against the given store
async fn rip_page(target: &Url, store: Arc<dyn CounterStore>) -> ScrapeReport {
    let client = build_http_client(&FetcherConfig::default()).expect("Failed to build client");
    let body = fetch_target(&client, target).await.expect("Fetch failed");
    ScrapeReport::from(rip(target, body, store).await)
}

fn fresh_store() -> Arc<dyn CounterStore> {
    Arc::new(SqliteCounterStore::new_in_memory().expect("Failed to open store"))
}

#[tokio::test]
async fn test_end_to_end_three_anchors() {
    let server = MockServer::start().await;
    let target = serve_page(
        &server,
        r#"<html><body>
            <a href="https://a.com">A</a>
            <a href="https://b.com">B</a>
            <a href="https://a.com/other">A again</a>
        </body></html>"#,
    )
    .await;

    let report = rip_page(&target, fresh_store()).await;

    assert_eq!(
        report.links,
        vec!["https://a.com", "https://b.com", "https://a.com/other"]
    );
    assert_eq!(report.hosts.get("a.com"), Some(&2));
    assert_eq!(report.hosts.get("b.com"), Some(&1));
    assert_eq!(report.hosts.len(), 2);
    assert_eq!(report.rip_count, 0);
}

#[tokio::test]
async fn test_relative_links_resolved_against_target() {
    let server = MockServer::start().await;
    let target = serve_page(
        &server,
        r#"<html><body><a href="/about">About</a></body></html>"#,
    )
    .await;

    let report = rip_page(&target, fresh_store()).await;

    assert_eq!(report.links, vec![format!("{}/about", server.uri())]);
    // The hostname is taken from the raw reference before resolution, so
    // relative links tally under the empty hostname.
    assert_eq!(report.hosts.get(""), Some(&1));
}

#[tokio::test]
async fn test_root_and_fragment_anchors_excluded() {
    let server = MockServer::start().await;
    let target = serve_page(
        &server,
        r##"<html><body>
            <a href="/">Home</a>
            <a href="#">Top</a>
        </body></html>"##,
    )
    .await;

    let report = rip_page(&target, fresh_store()).await;

    assert!(report.links.is_empty());
    assert!(report.hosts.is_empty());
}

#[tokio::test]
async fn test_truncated_html_returns_partial_results() {
    let server = MockServer::start().await;
    let target = serve_page(
        &server,
        r#"<html><body><a href="https://a.com/x">ok</a><div><a hre"#,
    )
    .await;

    let report = rip_page(&target, fresh_store()).await;

    assert_eq!(report.links, vec!["https://a.com/x"]);
    assert_eq!(report.hosts.get("a.com"), Some(&1));
}

#[tokio::test]
async fn test_ripcount_defaults_to_zero_without_record() {
    let server = MockServer::start().await;
    let target = serve_page(&server, "<html><body>nothing here</body></html>").await;

    let report = rip_page(&target, fresh_store()).await;

    assert_eq!(report.rip_count, 0);
}

#[tokio::test]
async fn test_ripcount_reflects_incremented_store() {
    let server = MockServer::start().await;
    let target = serve_page(
        &server,
        r#"<html><body><a href="https://a.com">A</a></body></html>"#,
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("counter.db");
    let store = Arc::new(SqliteCounterStore::new(&db_path).expect("Failed to open store"));
    store.increment(USAGE_KEY).expect("Increment failed");
    store.increment(USAGE_KEY).expect("Increment failed");

    let report = rip_page(&target, store).await;

    assert_eq!(report.rip_count, 2);
    assert_eq!(report.links, vec!["https://a.com"]);
}

#[tokio::test]
async fn test_large_page_reports_every_link() {
    let server = MockServer::start().await;

    let mut html = String::from("<html><body>");
    for i in 0..300 {
        html.push_str(&format!(r#"<a href="https://host{}.test/p">{}</a>"#, i, i));
    }
    html.push_str("</body></html>");
    let target = serve_page(&server, &html).await;

    let store = fresh_store();
    store.increment(USAGE_KEY).expect("Increment failed");

    let report = rip_page(&target, store).await;

    // The counter lookup finishing first must not cut extraction short.
    assert_eq!(report.links.len(), 300);
    assert_eq!(report.hosts.len(), 300);
    assert_eq!(report.rip_count, 1);
}

#[tokio::test]
async fn test_fetch_error_surfaces_before_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let target = Url::parse(&format!("{}/missing", server.uri())).unwrap();
    let client = build_http_client(&FetcherConfig::default()).unwrap();

    let result = fetch_target(&client, &target).await;
    assert!(result.is_err());
}
