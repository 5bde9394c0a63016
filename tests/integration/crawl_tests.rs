//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! HTTP fetcher through the crawl service end-to-end.

use luna_crawler::config::Config;
use luna_crawler::output::{export_csv, CrawlLog, FileCrawlLog, NoopCrawlLog};
use luna_crawler::package::Tier;
use luna_crawler::{CrawlOutcome, CrawlService, CrawlStatus, SessionKey};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short request timeout
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 1;
    config
}

fn create_service(config: &Config) -> CrawlService {
    CrawlService::from_config_with_log(config, Arc::new(NoopCrawlLog))
        .expect("Failed to create service")
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

async fn mount_html(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn crawl_to_completion(service: &CrawlService, seed: &str) -> SessionKey {
    let key = service.start_crawl(seed, None).expect("Failed to start crawl");
    tokio::time::timeout(Duration::from_secs(20), service.join(&key))
        .await
        .expect("Crawl did not finish");
    key
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .port()
        .expect("Mock server has no port");

    mount_html(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/page1">Page 1</a>
            <a href="/page1#top">Page 1 again</a>
            <a href="page2">Page 2</a>
            <a href="{base}/logo.png">Logo</a>
            <a href="http://localhost:{port}/elsewhere">Other host</a>
            <a href="mailto:info@example.com">Mail</a>
            </body></html>"#,
            base = base_url,
            port = port
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(r#"<html><body><a href="/page2">Page 2</a></body></html>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_html(&mock_server, "/page2", "<html><body>Content 2</body></html>").await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("png", "image/png"))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = create_service(&create_test_config());
    let key = crawl_to_completion(&service, &format!("{}/", base_url)).await;

    let status = service.status(&key);
    assert_eq!(status.status, CrawlStatus::Done);
    assert_eq!(status.found_count, 3);

    let report = service.results(&key).expect("No results");
    assert_eq!(
        report.urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
    assert_eq!(report.package.tier, Tier::Starter);
    assert_eq!(report.outcome, CrawlOutcome::Completed);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_dead_link_not_in_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
    )
    .await;
    mount_html(&mock_server, "/ok", "<p>ok</p>").await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw(r#"<a href="/secret">secret</a>"#, "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(html("<p>secret</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = create_service(&create_test_config());
    let key = crawl_to_completion(&service, &base_url).await;

    let report = service.results(&key).expect("No results");
    assert_eq!(
        report.urls,
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn test_non_html_content_excluded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/api/data">Data</a><a href="/feed">Feed</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<rss/>", "application/rss+xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_service(&create_test_config());
    let key = crawl_to_completion(&service, &base_url).await;

    let report = service.results(&key).expect("No results");
    assert_eq!(report.urls, vec![format!("{}/", base_url)]);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#,
    )
    .await;
    mount_html(&mock_server, "/fast", "<p>fast</p>").await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>slow</p>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let service = create_service(&create_test_config());
    let key = crawl_to_completion(&service, &base_url).await;

    let report = service.results(&key).expect("No results");
    assert_eq!(
        report.urls,
        vec![format!("{}/", base_url), format!("{}/fast", base_url)]
    );
}

#[tokio::test]
async fn test_progress_visible_while_running() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", r#"<a href="/next">Next</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html("<p>next</p>").set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let service = create_service(&create_test_config());
    let key = service.start_crawl(&base_url, None).expect("Failed to start");

    let next_url = format!("{}/next", base_url);
    let mut observed = false;
    for _ in 0..100 {
        let status = service.status(&key);
        if status.status == CrawlStatus::Running && status.current_url == next_url {
            assert_eq!(status.found_count, 1);
            observed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(observed, "never saw the crawl working on {}", next_url);

    service.join(&key).await;
    let status = service.status(&key);
    assert_eq!(status.status, CrawlStatus::Done);
    assert_eq!(status.found_count, 2);
}

#[tokio::test]
async fn test_unknown_session_status() {
    let service = create_service(&create_test_config());
    let status = service.status(&SessionKey::from("never-started"));

    assert_eq!(status.status, CrawlStatus::Idle);
    assert_eq!(status.found_count, 0);
    assert_eq!(status.current_url, "");
}

#[tokio::test]
async fn test_unreachable_domain_finishes_empty() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let service = create_service(&create_test_config());
    let key = crawl_to_completion(&service, &format!("http://127.0.0.1:{}/", port)).await;

    let report = service.results(&key).expect("No results");
    assert!(report.urls.is_empty());
    assert_eq!(report.package.tier, Tier::Starter);
    assert_eq!(service.status(&key).found_count, 0);
}

#[tokio::test]
async fn test_max_pages_from_config() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_html(&mock_server, route, "<p>leaf</p>").await;
    }

    let mut config = create_test_config();
    config.crawler.max_pages = Some(2);
    let service = create_service(&config);
    let key = crawl_to_completion(&service, &base_url).await;

    let report = service.results(&key).expect("No results");
    assert_eq!(report.urls.len(), 2);
    assert_eq!(report.outcome, CrawlOutcome::PageCapReached);
}

#[tokio::test]
async fn test_crawl_log_and_csv_export() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let seed = format!("{}/", base_url);

    mount_html(&mock_server, "/", r#"<a href="/kontakt">Kontakt</a>"#).await;
    mount_html(&mock_server, "/kontakt", "<p>Kontakt</p>").await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("crawl_log.txt");
    let csv_path = dir.path().join("unterseiten_luna.csv");

    let log: Arc<dyn CrawlLog> = Arc::new(FileCrawlLog::new(&log_path));
    let service = CrawlService::from_config_with_log(&create_test_config(), log)
        .expect("Failed to create service");
    let key = crawl_to_completion(&service, &seed).await;

    let report = service.results(&key).expect("No results");
    export_csv(&report.urls, &csv_path).expect("Failed to export CSV");

    let csv = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(
        csv,
        format!("Gefundene Unterseiten\n{}/\n{}/kontakt\n", base_url, base_url)
    );

    let log = std::fs::read_to_string(&log_path).expect("Failed to read log");
    assert!(log.contains(&format!("Crawl gestartet für Domain: {}", seed)));
    assert!(log.contains(&format!("Crawl beendet für {} – Gefundene Seiten: 2", seed)));
    assert!(log.contains(&format!("  - {}/kontakt", base_url)));
    assert!(log.lines().all(|line| line.starts_with('[')));
}
