//! Integration tests for the crawler
//!
//! These tests use wiremock to serve directory listings and run the full
//! crawl cycle end-to-end over HTTP.

use index_ripple::config::CrawlConfig;
use index_ripple::crawler::{Coordinator, CrawlOutcome, SeedSource};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders an Apache-style listing page linking to `hrefs`
fn listing_page(title_path: &str, hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| format!("<img src=\"/icons/text.gif\"> <a href=\"{}\">{}</a>\n", href, href))
        .collect();
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 3.2 Final//EN">
<html><head><title>Index of {}</title></head><body>
<h1>Index of {}</h1>
<pre><a href="?C=N;O=D">Name</a> <a href="?C=M;O=A">Last modified</a>
<hr><a href="/">Parent Directory</a>
{}<hr></pre></body></html>"#,
        title_path, title_path, rows
    )
}

async fn mount_listing(server: &MockServer, at: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(listing_page(at, hrefs), "text/html"),
        )
        .expect(1..)
        .mount(server)
        .await;
}

async fn run_crawl(
    seeds: Vec<String>,
    concurrency: usize,
    files_only: bool,
) -> CrawlOutcome<Vec<u8>, Vec<u8>> {
    let config = CrawlConfig {
        concurrency,
        files_only,
    };
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    tokio::time::timeout(
        Duration::from_secs(30),
        coordinator.run(SeedSource::from_args(seeds), Vec::new(), Vec::new()),
    )
    .await
    .expect("Crawl hung")
    .expect("Crawl failed")
}

fn sorted_lines(bytes: &[u8]) -> Vec<String> {
    let mut lines: Vec<String> = String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

#[tokio::test]
async fn test_full_crawl_of_listing_tree() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/", &["pub/", "README"]).await;
    mount_listing(&mock_server, "/pub/", &["iso/", "notes.txt"]).await;
    mount_listing(&mock_server, "/pub/iso/", &["disk1.iso", "disk2.iso"]).await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 4, false).await;

    let mut expected = vec![
        format!("{}/pub/", base_url),
        format!("{}/README", base_url),
        format!("{}/pub/iso/", base_url),
        format!("{}/pub/notes.txt", base_url),
        format!("{}/pub/iso/disk1.iso", base_url),
        format!("{}/pub/iso/disk2.iso", base_url),
    ];
    expected.sort();

    assert_eq!(sorted_lines(&outcome.results), expected);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.summary.tasks, 3);
    assert_eq!(outcome.summary.listings, 3);
}

#[tokio::test]
async fn test_files_only_still_traverses_directories() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/", &["sub/", "a.txt"]).await;
    Mock::given(method("GET"))
        .and(path("/sub/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(listing_page("/sub/", &["b.txt"]), "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 2, true).await;

    assert_eq!(
        sorted_lines(&outcome.results),
        vec![format!("{}/a.txt", base_url), format!("{}/sub/b.txt", base_url)]
    );
}

#[tokio::test]
async fn test_filtered_links_are_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let absolute = format!("{}/elsewhere/", base_url);
    mount_listing(
        &mock_server,
        "/",
        &[absolute.as_str(), "/elsewhere/", "?x=1", "kept/"],
    )
    .await;
    mount_listing(&mock_server, "/kept/", &[]).await;
    Mock::given(method("GET"))
        .and(path("/elsewhere/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 2, false).await;

    assert_eq!(
        sorted_lines(&outcome.results),
        vec![format!("{}/kept/", base_url)]
    );
}

#[tokio::test]
async fn test_fetch_error_is_isolated_to_its_task() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/", &["broken/", "fine/"]).await;
    Mock::given(method("GET"))
        .and(path("/broken/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_listing(&mock_server, "/fine/", &["ok.txt"]).await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 3, true).await;

    assert_eq!(
        sorted_lines(&outcome.results),
        vec![format!("{}/fine/ok.txt", base_url)]
    );

    let errors = String::from_utf8(outcome.errors).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.contains(&format!("{}/broken/", base_url)));
    assert!(errors.contains("500"));
}

#[tokio::test]
async fn test_non_listing_pages_are_skipped_silently() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/", &["app/", "data/"]).await;
    Mock::given(method("GET"))
        .and(path("/app/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>My App</title></head><body><a href=\"x/\">x</a></body></html>",
            "text/html",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title": "Index of /data/"}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 2, true).await;

    assert!(outcome.results.is_empty());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.summary.pages_skipped, 2);
}

#[tokio::test]
async fn test_single_worker_chain_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let depth = 12;
    let mut at = "/".to_string();
    for _ in 0..depth {
        mount_listing(&mock_server, &at, &["next/"]).await;
        at.push_str("next/");
    }
    mount_listing(&mock_server, &at, &["bottom.txt"]).await;

    let outcome = run_crawl(vec![format!("{}/", base_url)], 1, true).await;

    assert_eq!(
        sorted_lines(&outcome.results),
        vec![format!("{}{}bottom.txt", base_url, at)]
    );
    assert_eq!(outcome.summary.inline_fallbacks, depth);
    assert_eq!(outcome.summary.tasks, outcome.summary.tasks_finished);
}

#[tokio::test]
async fn test_multiple_seeds_and_unreachable_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/a/", &["one.txt"]).await;
    mount_listing(&mock_server, "/b/", &["two.txt"]).await;

    let seeds = vec![
        format!("{}/a/", base_url),
        "http://127.0.0.1:9/".to_string(),
        format!("{}/b/", base_url),
    ];
    let outcome = run_crawl(seeds, 2, false).await;

    assert_eq!(
        sorted_lines(&outcome.results),
        vec![format!("{}/a/one.txt", base_url), format!("{}/b/two.txt", base_url)]
    );
    assert_eq!(outcome.summary.seeds, 3);
    assert_eq!(outcome.summary.errors, 1);
}

#[tokio::test]
async fn test_no_seeds_produces_no_output() {
    let outcome = run_crawl(Vec::new(), 10, false).await;

    assert!(outcome.results.is_empty());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.summary.seeds, 0);
}
