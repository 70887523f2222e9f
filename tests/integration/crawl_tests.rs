//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the
//! static fetcher and traversal end-to-end.

use site_word_finder::config::{
    parse_config, Config, CrawlerConfig, FetchConfig, OutputConfig, UserAgentConfig,
};
use site_word_finder::crawler::{run_crawl, Finder};
use site_word_finder::state::CrawlState;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a static-fetch configuration for the given seed
fn create_test_config(seed_url: &str, phrase: &str, max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            target_phrase: phrase.to_string(),
            max_pages,
        },
        fetch: FetchConfig {
            timeout_secs: 5,
            ..FetchConfig::default()
        },
        user_agent: UserAgentConfig::default(),
        output: OutputConfig::default(),
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bounded_search_on_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/home",
        r#"<p>Welcome, lorem ipsum dolor.</p>
        <a href="/about">About</a>
        <a href="contact#form">Contact</a>
        <a href="http://other.test/">Partner</a>"#,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        r#"<p>About us: Lorem Ipsum since 1500.</p><a href="/home">Home</a>"#,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/contact",
        r#"<p>Write to us.</p><a href="/careers">Jobs</a>"#,
        1,
    )
    .await;
    // Never admitted: the bound is reached before /contact is fetched
    mount_page(&mock_server, "/careers", "<p>lorem ipsum jobs</p>", 0).await;

    let config = create_test_config(&format!("{}/home", base_url), "lorem ipsum", 3);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    let results = finder.find().await.expect("Search failed");

    let urls: Vec<String> = results.iter().map(|r| r.url.to_string()).collect();
    assert_eq!(
        urls,
        vec![format!("{}/home", base_url), format!("{}/about", base_url)]
    );
    assert!(results[0].snippet.contains("lorem ipsum dolor"));
    assert!(results[1].snippet.contains("Lorem Ipsum since 1500"));
    assert!(results.iter().all(|r| r.screenshot.is_none()));

    assert_eq!(finder.state(), CrawlState::Done);
    let stats = finder.stats();
    assert_eq!(stats.pages_admitted, 3);
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.matches, 2);
}

#[tokio::test]
async fn test_seed_server_error_yields_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("lorem ipsum"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "lorem ipsum", 10);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    let results = finder.find().await.expect("Search failed");

    assert!(results.is_empty());
    assert_eq!(finder.stats().fetch_failures, 1);
}

#[tokio::test]
async fn test_missing_pages_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/gone">Gone</a><a href="/here">Here</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/here", "<p>found the needle</p>", 1).await;
    // /gone has no mock and answers 404

    let config = create_test_config(&mock_server.uri(), "needle", 10);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    let results = finder.find().await.expect("Search failed");

    assert_eq!(results.len(), 1);
    assert!(results[0].url.as_str().ends_with("/here"));
    assert_eq!(finder.stats().fetch_failures, 1);
}

#[tokio::test]
async fn test_each_page_fetched_once_despite_cycles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r##"<a href="/a">A</a><a href="/b">B</a><a href="#top">Top</a>"##,
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        &format!(r#"<a href="{}/b#part">B</a><a href="/">Home</a>"#, base_url),
        1,
    )
    .await;
    mount_page(&mock_server, "/b", r#"<a href="/a">A</a><a href="/">Home</a>"#, 1).await;

    let config = create_test_config(&base_url, "absent phrase", 50);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    let results = finder.find().await.expect("Search failed");

    assert!(results.is_empty());
    assert_eq!(finder.stats().pages_fetched, 3);
    // Hit counts are verified when the mock server is dropped
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; SiteWordFinder/1.0)",
        ))
        .respond_with(html_page("<p>hello world</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "Hello World", 1);
    let results = run_crawl(&config).await.expect("Search failed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "hello world");
}

#[tokio::test]
async fn test_non_markup_response_is_not_matched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.4 lorem ipsum".to_vec(), "application/pdf"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "lorem ipsum", 5);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    let results = finder.find().await.expect("Search failed");

    assert!(results.is_empty());
    assert_eq!(finder.stats().fetch_failures, 1);
}

#[tokio::test]
async fn test_search_from_toml_config() {
    let mock_server = MockServer::start().await;
    let host_and_port = mock_server
        .uri()
        .trim_start_matches("http://")
        .to_string();

    mount_page(
        &mock_server,
        "/start",
        r#"<h1>Start</h1><a href="/next">Next</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/next", "<p>The Target Phrase lives here.</p>", 1).await;

    // Seed without a scheme gets http:// prepended
    let toml_content = format!(
        r#"
[crawler]
seed-url = "{}/start"
target-phrase = "target phrase"
max-pages = 5

[fetch]
timeout-secs = 5
"#,
        host_and_port
    );
    let config = parse_config(&toml_content).expect("Failed to parse config");

    let results = run_crawl(&config).await.expect("Search failed");

    assert_eq!(results.len(), 1);
    assert!(results[0].url.as_str().ends_with("/next"));
    assert_eq!(results[0].snippet, "The Target Phrase lives here.");
}

#[tokio::test]
async fn test_second_search_is_rejected() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>once</p>", 1).await;

    let config = create_test_config(&mock_server.uri(), "once", 1);
    let mut finder = Finder::new(&config).expect("Failed to create finder");

    finder.find().await.expect("Search failed");

    assert!(finder.find().await.is_err());
}
