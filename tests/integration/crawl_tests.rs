//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seeds to the exported CSV.

use campus_harvest::config::{
    Config, CrawlerConfig, OutputConfig, ScopeConfig, SeedConfig, UserAgentConfig,
};
use campus_harvest::crawler::run_crawl;
use campus_harvest::output::{export_csv, CSV_HEADER};
use campus_harvest::{HarvestError, PageOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILLER: &str = "This paragraph is comfortably longer than the forty character minimum.";

/// Creates a test configuration scoped to the mock server's host
fn create_test_config(seeds: Vec<String>, max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            delay_ms: 0,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig::default(),
        scope: ScopeConfig {
            allowed_domains: vec!["127.0.0.1".to_string()],
            excluded_extensions: vec![".pdf".to_string()],
        },
        seeds: SeedConfig {
            urls: seeds,
            from_allowed_domains: false,
            sitemap_url: None,
        },
        output: OutputConfig {
            csv_path: "sections.csv".to_string(),
        },
    }
}

/// Builds a page with one h1 section and the given outgoing links
fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>{title}</title></head><body>\
         <main><h1>{title} heading</h1><p>{FILLER}</p>{anchors}</main>\
         </body></html>"
    )
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_exports_csv_in_bfs_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/a", page("A", &["/b", "/c"])).await;
    mount_page(&server, "/b", page("B", &["/d", "/a"])).await;
    mount_page(&server, "/c", page("C", &[])).await;
    mount_page(&server, "/d", page("D", &[])).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("sections.csv");
    let config = create_test_config(vec![format!("{}/a", base)], 100);

    let report = run_crawl(&config).await.expect("crawl should run");

    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base),
            format!("{}/d", base),
        ]
    );
    assert_eq!(report.visited, 4);
    assert_eq!(report.stats.pages_recorded(), 4);

    let rows = export_csv(&report.pages, &csv_path).expect("export should succeed");
    assert_eq!(rows, 4);

    let mut reader = csv::Reader::from_path(&csv_path).expect("Failed to open CSV");
    let headers = reader.headers().expect("CSV should have headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("CSV rows should parse");
    assert_eq!(records.len(), 4);
    assert_eq!(&records[0][0], format!("{}/a", base));
    assert_eq!(&records[0][1], "A");
    assert_eq!(&records[0][2], "A heading");
    assert_eq!(&records[0][3], FILLER);
}

#[tokio::test]
async fn test_two_seeds_are_drained_before_their_children() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/a", page("A", &["/c"])).await;
    mount_page(&server, "/b", page("B", &["/d"])).await;
    mount_page(&server, "/c", page("C", &[])).await;
    mount_page(&server, "/d", page("D", &[])).await;

    let seeds = vec![format!("{}/a", base), format!("{}/b", base)];
    let report = run_crawl(&create_test_config(seeds, 100))
        .await
        .expect("crawl should run");

    let titles: Vec<&str> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_page_cap_limits_visited_urls() {
    let server = MockServer::start().await;
    let base = server.uri();

    let children: Vec<String> = (1..10).map(|i| format!("/p{}", i)).collect();
    let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/p0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(page("Root", &child_refs), "text/html"),
        )
        .mount(&server)
        .await;
    for child in &children {
        Mock::given(method("GET"))
            .and(path(child.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page("Child", &[]), "text/html"))
            .mount(&server)
            .await;
    }

    let config = create_test_config(vec![format!("{}/p0", base)], 3);
    let report = run_crawl(&config).await.expect("crawl should run");

    assert_eq!(report.visited, 3);
    assert_eq!(report.pages.len(), 3);
    assert!(report.pending > 0);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_failed_and_non_html_pages_produce_no_records() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/ok", page("Ok", &["/missing", "/data"])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(vec![format!("{}/ok", base)], 100);
    let report = run_crawl(&config).await.expect("crawl should run");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.visited, 3);
    assert_eq!(report.stats.count(PageOutcome::HttpError), 1);
    assert_eq!(report.stats.count(PageOutcome::ContentMismatch), 1);
}

#[tokio::test]
async fn test_query_and_fragment_variants_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/home",
        page("Home", &["/about?ref=nav", "/about#team", "/about/", "/home?x=1"]),
    )
    .await;
    mount_page(&server, "/about", page("About", &[])).await;

    let config = create_test_config(vec![format!("{}/home", base)], 100);
    let report = run_crawl(&config).await.expect("crawl should run");

    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![format!("{}/home", base), format!("{}/about", base)]);
    assert_eq!(report.visited, 2);
    assert!(report.stats.count(PageOutcome::AlreadyVisited) >= 2);
}

#[tokio::test]
async fn test_excluded_extensions_and_foreign_hosts_never_requested() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/index",
        page(
            "Index",
            &["/files/report.pdf", "https://other.example.edu/", "mailto:x@y.edu"],
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(vec![format!("{}/index", base)], 100);
    let report = run_crawl(&config).await.expect("crawl should run");

    assert_eq!(report.visited, 1);
    assert!(report.pages[0].links.is_empty());
}

#[tokio::test]
async fn test_seeds_from_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<ul><li><a href="/x">X</a></li><li><a href="/y">Y</a></li><li><a href="https://elsewhere.edu/">E</a></li></ul>"#,
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/x", page("X", &[])).await;
    mount_page(&server, "/y", page("Y", &[])).await;

    let mut config = create_test_config(Vec::new(), 100);
    config.seeds.sitemap_url = Some(format!("{}/sitemap/", base));

    let report = run_crawl(&config).await.expect("crawl should run");

    let titles: Vec<&str> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["X", "Y"]);
}

#[tokio::test]
async fn test_no_seeds_is_fatal() {
    let config = create_test_config(Vec::new(), 100);

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(HarvestError::NoSeeds)));
}

#[tokio::test]
async fn test_empty_crawl_still_writes_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("empty.csv");
    let config = create_test_config(vec![format!("{}/down", server.uri())], 10);

    let report = run_crawl(&config).await.expect("crawl should run");
    let rows = export_csv(&report.pages, &csv_path).expect("export should succeed");

    assert_eq!(rows, 0);
    let contents = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(contents.trim_end(), "URL,MainTitle,SectionTitle,Content");
}
