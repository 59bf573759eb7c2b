//! Integration tests for the fetcher, graph builder and path finder
//!
//! These tests use wiremock to serve articles from a mock origin and a
//! temporary directory as the page cache.

use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiki_ripple::config::{
    Config, CrawlConfig, FetcherConfig, QueryEntry, SeedEntry, UserAgentConfig,
};
use wiki_ripple::crawler::{
    build_graph, build_http_client, run_queries, GraphBuilder, HtmlMetadataExtractor, PageCache,
    PageMetadata, PageMetadataExtractor, PoliteFetcher,
};
use wiki_ripple::ExtractionError;
use wiki_ripple::graph::{find_path, PageDirectory};
use wiki_ripple::WikiError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn create_fetcher(cache_dir: &TempDir, min_interval_ms: u64, max_requests: u32) -> PoliteFetcher {
    let client =
        build_http_client(&user_agent(), Duration::from_secs(5)).expect("Failed to build client");
    PoliteFetcher::with_client(
        client,
        PageCache::new(cache_dir.path()),
        Duration::from_millis(min_interval_ms),
        max_requests,
    )
}

fn article_prefix(server: &MockServer) -> String {
    format!("{}/wiki/", server.uri())
}

/// Builds an article page in the shape the extractor expects
fn article_html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|id| format!(r#"<a href="/wiki/{}">{}</a>"#, id, id))
        .collect();

    format!(
        r#"<html><head><title>{} - Wikipedia</title></head><body>
        <p>Article about {}.</p>
        {}
        <ul><li id="footer-info-lastmod"> This page was last edited on 9 November 2021, at 01:02 (UTC).</li></ul>
        </body></html>"#,
        title, title, anchors
    )
}

/// Serves an article and expects it to be requested exactly `times` times
async fn mount_article(server: &MockServer, id: &str, links: &[&str], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html(id, links))
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expand_registers_links_recursively() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Felis", "Dog"], 1).await;
    mount_article(&server, "Felis", &["Felidae"], 1).await;
    mount_article(&server, "Dog", &["Wolf"], 1).await;
    mount_article(&server, "Felidae", &["Lion"], 1).await;
    mount_article(&server, "Wolf", &["Canis"], 1).await;
    mount_article(&server, "Lion", &[], 0).await;
    mount_article(&server, "Canis", &[], 0).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    let cat = builder.seed(&mut directory, "Cat").await.unwrap();
    assert_eq!(cat.title, "Cat");
    assert_eq!(cat.outgoing_link_ids, vec!["Felis", "Dog"]);

    let report = builder.expand(&mut directory, "Cat", 1, 2).await.unwrap();

    assert_eq!(report.pages_added, 4);
    assert!(report.failures.is_empty());
    let ids: Vec<&str> = directory.ids().collect();
    assert_eq!(ids, vec!["Cat", "Felis", "Felidae", "Dog", "Wolf"]);
    assert_eq!(
        directory.get("Dog").unwrap().url,
        format!("{}Dog", article_prefix(&server))
    );
}

#[tokio::test]
async fn test_depth_zero_registers_direct_links_only() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Felis", "Dog"], 1).await;
    mount_article(&server, "Felis", &["Felidae"], 1).await;
    mount_article(&server, "Dog", &["Wolf"], 1).await;
    mount_article(&server, "Felidae", &[], 0).await;
    mount_article(&server, "Wolf", &[], 0).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    let report = builder.expand(&mut directory, "Cat", 0, 5).await.unwrap();

    assert_eq!(report.pages_added, 2);
    assert_eq!(directory.len(), 3);
    assert!(!directory.contains("Felidae"));
    assert!(!directory.contains("Wolf"));
}

#[tokio::test]
async fn test_breadth_limit_truncates_links() {
    let server = MockServer::start().await;
    let links: Vec<String> = (0..10).map(|i| format!("Link{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();

    mount_article(&server, "Hub", &link_refs, 1).await;
    for (i, id) in link_refs.iter().enumerate() {
        let times = if i < 3 { 1 } else { 0 };
        mount_article(&server, id, &[], times).await;
    }

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Hub").await.unwrap();
    let report = builder.expand(&mut directory, "Hub", 2, 3).await.unwrap();

    assert_eq!(report.pages_added, 3);
    let ids: Vec<&str> = directory.ids().collect();
    assert_eq!(ids, vec!["Hub", "Link0", "Link1", "Link2"]);
}

#[tokio::test]
async fn test_repeated_expansion_fetches_nothing() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Felis", "Dog"], 1).await;
    mount_article(&server, "Felis", &[], 1).await;
    mount_article(&server, "Dog", &[], 1).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    builder.expand(&mut directory, "Cat", 1, 5).await.unwrap();
    let requests_after_first = builder.fetcher().request_count();
    let hits_after_first = builder.fetcher().cache_hits();

    builder.seed(&mut directory, "Cat").await.unwrap();
    let report = builder.expand(&mut directory, "Cat", 1, 5).await.unwrap();

    assert_eq!(report.pages_added, 0);
    assert_eq!(requests_after_first, 3);
    assert_eq!(builder.fetcher().request_count(), 3);
    assert_eq!(builder.fetcher().cache_hits(), hits_after_first);
}

#[tokio::test]
async fn test_link_cycle_is_fetched_once() {
    let server = MockServer::start().await;
    mount_article(&server, "A", &["B"], 1).await;
    mount_article(&server, "B", &["A", "C"], 1).await;
    mount_article(&server, "C", &["B", "A"], 1).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "A").await.unwrap();
    let report = builder.expand(&mut directory, "A", 10, 5).await.unwrap();

    assert_eq!(report.pages_added, 2);
    assert_eq!(directory.len(), 3);
}

#[tokio::test]
async fn test_failed_link_is_skipped_and_siblings_continue() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Missing", "Broken", "Dog"], 1).await;
    mount_article(&server, "Dog", &[], 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Broken</title></head><body></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    let report = builder.expand(&mut directory, "Cat", 1, 5).await.unwrap();

    assert_eq!(report.pages_added, 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].0, "Missing");
    assert!(report.failures[0].1.contains("HTTP 404"));
    assert_eq!(report.failures[1].0, "Broken");
    assert!(directory.contains("Dog"));
    assert!(!directory.contains("Missing"));
    assert!(!directory.contains("Broken"));
}

#[tokio::test]
async fn test_link_ids_starting_with_http_are_articles() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["httpd", "Dog"], 1).await;
    mount_article(&server, "httpd", &[], 1).await;
    mount_article(&server, "Dog", &[], 1).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    let report = builder.expand(&mut directory, "Cat", 0, 5).await.unwrap();

    assert_eq!(report.pages_added, 2);
    assert!(report.failures.is_empty());
    assert!(directory.contains("httpd"));
    assert!(directory.contains("Dog"));
}

/// Wraps the HTML extractor and puts a URL-shaped id in front of every link list
struct UrlLinkExtractor {
    inner: HtmlMetadataExtractor,
}

impl PageMetadataExtractor for UrlLinkExtractor {
    fn extract(&self, content: &str) -> Result<PageMetadata, ExtractionError> {
        let mut metadata = self.inner.extract(content)?;
        metadata
            .link_ids
            .insert(0, "https://elsewhere.example/Cat".to_string());
        Ok(metadata)
    }
}

#[tokio::test]
async fn test_invalid_link_id_is_skipped_and_siblings_continue() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Dog"], 1).await;
    mount_article(&server, "Dog", &["Wolf"], 1).await;
    mount_article(&server, "Wolf", &[], 1).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = UrlLinkExtractor {
        inner: HtmlMetadataExtractor::new(),
    };
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    let report = builder.expand(&mut directory, "Cat", 1, 5).await.unwrap();

    // Cat and Dog each carry the bad id; neither occurrence stops the expansion.
    assert_eq!(report.pages_added, 2);
    assert_eq!(report.failures.len(), 2);
    assert!(report
        .failures
        .iter()
        .all(|(id, reason)| id == "https://elsewhere.example/Cat"
            && reason.contains("Invalid article id")));
    assert!(directory.contains("Dog"));
    assert!(directory.contains("Wolf"));
    assert_eq!(builder.fetcher().request_count(), 3);
}

#[tokio::test]
async fn test_request_ceiling_aborts_expansion() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["A", "B", "C"], 1).await;
    mount_article(&server, "A", &[], 1).await;
    mount_article(&server, "B", &[], 0).await;
    mount_article(&server, "C", &[], 0).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 2);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    let result = builder.expand(&mut directory, "Cat", 1, 5).await;

    assert!(matches!(
        result,
        Err(WikiError::TooManyRequests { limit: 2, .. })
    ));
    assert!(directory.contains("A"));
    assert!(!directory.contains("B"));
    assert_eq!(builder.fetcher().request_count(), 2);
}

#[tokio::test]
async fn test_expand_unknown_article() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 5);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    let result = builder.expand(&mut directory, "Nowhere", 1, 5).await;
    assert!(matches!(result, Err(WikiError::UnknownArticle(id)) if id == "Nowhere"));
}

#[tokio::test]
async fn test_cache_is_shared_across_fetchers() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Dog"], 1).await;
    let url = format!("{}Cat", article_prefix(&server));
    let cache_dir = TempDir::new().unwrap();

    let mut first = create_fetcher(&cache_dir, 0, 5);
    let body = first.fetch(&url).await.unwrap();
    assert_eq!(first.request_count(), 1);

    let mut second = create_fetcher(&cache_dir, 0, 5);
    let cached = second.fetch(&url).await.unwrap();

    assert_eq!(cached, body);
    assert_eq!(second.request_count(), 0);
    assert_eq!(second.cache_hits(), 1);
}

#[tokio::test]
async fn test_ignore_cache_refetches() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &[], 2).await;
    let url = format!("{}Cat", article_prefix(&server));
    let cache_dir = TempDir::new().unwrap();

    let mut fetcher = create_fetcher(&cache_dir, 0, 5).ignore_cache(true);
    fetcher.fetch(&url).await.unwrap();
    fetcher.fetch(&url).await.unwrap();

    assert_eq!(fetcher.request_count(), 2);
    assert_eq!(fetcher.cache_hits(), 0);
}

#[tokio::test]
async fn test_live_requests_are_spaced() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &[], 1).await;
    mount_article(&server, "Dog", &[], 1).await;
    let prefix = article_prefix(&server);
    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 200, 5);

    let start = Instant::now();
    fetcher.fetch(&format!("{}Cat", prefix)).await.unwrap();
    fetcher.fetch(&format!("{}Dog", prefix)).await.unwrap();

    assert!(
        start.elapsed() >= Duration::from_millis(200),
        "two live requests finished {:?} apart",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_cache_hits_are_not_throttled() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &[], 1).await;
    let url = format!("{}Cat", article_prefix(&server));
    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 2_000, 5);

    fetcher.fetch(&url).await.unwrap();
    let start = Instant::now();
    fetcher.fetch(&url).await.unwrap();

    assert!(start.elapsed() < Duration::from_millis(1_000));
}

#[tokio::test]
async fn test_safety_valve_blocks_further_requests() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &[], 1).await;
    mount_article(&server, "Dog", &[], 0).await;
    let prefix = article_prefix(&server);
    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 1);

    fetcher.fetch(&format!("{}Cat", prefix)).await.unwrap();
    let refused = fetcher.fetch(&format!("{}Dog", prefix)).await;
    let refused_again = fetcher.fetch(&format!("{}Dog", prefix)).await;

    assert!(matches!(refused, Err(WikiError::TooManyRequests { .. })));
    assert!(matches!(refused_again, Err(WikiError::TooManyRequests { .. })));
    assert_eq!(fetcher.request_count(), 1);

    // Cached pages are still served once the valve has tripped.
    assert!(fetcher.fetch(&format!("{}Cat", prefix)).await.is_ok());
}

#[tokio::test]
async fn test_path_search_over_built_graph() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Felis", "Dog"], 1).await;
    mount_article(&server, "Felis", &["Felidae", "Dog"], 1).await;
    mount_article(&server, "Dog", &["Wolf"], 1).await;
    mount_article(&server, "Felidae", &["Dinosaur"], 1).await;
    // Dog is first reached from Felis at depth 0, so its links are never loaded.
    mount_article(&server, "Wolf", &["Dinosaur"], 0).await;

    let cache_dir = TempDir::new().unwrap();
    let mut fetcher = create_fetcher(&cache_dir, 0, 50);
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();
    let mut builder = GraphBuilder::new(&mut fetcher, &extractor, article_prefix(&server));

    builder.seed(&mut directory, "Cat").await.unwrap();
    builder.expand(&mut directory, "Cat", 1, 2).await.unwrap();

    let cat = directory.get("Cat").unwrap();
    let path = find_path(&directory, cat, &[], "Dinosaur", 4).unwrap();
    assert_eq!(path, vec!["Cat", "Felis", "Felidae", "Dinosaur"]);

    let dog = directory.get("Dog").unwrap();
    assert_eq!(find_path(&directory, dog, &[], "Cat", 4), None);
}

#[tokio::test]
async fn test_build_graph_and_run_queries_from_config() {
    let server = MockServer::start().await;
    mount_article(&server, "Cat", &["Felis"], 1).await;
    mount_article(&server, "Felis", &["Felidae"], 1).await;
    mount_article(&server, "Felidae", &[], 0).await;
    mount_article(&server, "Computer_science", &["Algorithm"], 1).await;
    mount_article(&server, "Algorithm", &["Cat"], 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let cache_dir = TempDir::new().unwrap();
    let config = Config {
        fetcher: FetcherConfig {
            article_prefix: article_prefix(&server),
            cache_dir: cache_dir.path().display().to_string(),
            min_request_interval: 0,
            max_requests: 20,
            request_timeout: 5,
            ignore_cache: false,
        },
        user_agent: user_agent(),
        crawl: CrawlConfig {
            breadth_limit: 5,
            depth_budget: 0,
            max_path_length: 4,
            tree_display_limit: 15,
        },
        seeds: vec![
            SeedEntry {
                id: "Cat".to_string(),
                breadth_limit: None,
                depth_budget: None,
            },
            SeedEntry {
                id: "Gone".to_string(),
                breadth_limit: None,
                depth_budget: None,
            },
            SeedEntry {
                id: "Computer_science".to_string(),
                breadth_limit: Some(1),
                depth_budget: Some(0),
            },
        ],
        queries: vec![
            QueryEntry {
                from: "Computer_science".to_string(),
                to: "Felidae".to_string(),
                max_path_length: None,
            },
            QueryEntry {
                from: "Cat".to_string(),
                to: "Algorithm".to_string(),
                max_path_length: None,
            },
        ],
    };

    let mut fetcher = PoliteFetcher::new(&config.fetcher, &config.user_agent).unwrap();
    let extractor = HtmlMetadataExtractor::new();
    let mut directory = PageDirectory::new();

    build_graph(&config, &mut fetcher, &extractor, &mut directory)
        .await
        .unwrap();

    let ids: Vec<&str> = directory.ids().collect();
    assert_eq!(ids, vec!["Cat", "Felis", "Computer_science", "Algorithm"]);

    let outcomes = run_queries(&config, &directory);
    assert_eq!(
        outcomes[0].path,
        Some(vec![
            "Computer_science".to_string(),
            "Algorithm".to_string(),
            "Cat".to_string(),
            "Felis".to_string(),
            "Felidae".to_string(),
        ])
    );
    assert_eq!(outcomes[1].path, None);
}
