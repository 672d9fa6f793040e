//! Integration tests for the auditor
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl, sitemap resolution and reporting cycle end-to-end.

use sitemap_audit::config::Config;
use sitemap_audit::{AuditError, Auditor, Measurement};
use std::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/xml")
}

fn auditor() -> Auditor {
    Auditor::new(&Config::default()).expect("Failed to build auditor")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, sitemap_route: &str) {
    mount(
        server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\nSitemap: {}{}\n",
            server.uri(),
            sitemap_route
        )),
    )
    .await;
}

fn urls(pages: &[sitemap_audit::WebPage]) -> Vec<String> {
    pages.iter().map(|p| p.url().to_string()).collect()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/",
        html(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="http://other.com/x">Elsewhere</a>
                <a href="/about">About again</a>
            </body></html>"#,
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<p>About us</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.expect("Crawl failed");

    let crawled = &auditor.session().crawled;
    assert_eq!(crawled.len(), 2);
    assert!(crawled.contains(base.as_str()));
    assert!(crawled.contains(format!("{}/about", base).as_str()));
    assert!(crawled.iter().all(|p| p.url().starts_with(&base)));
    assert!(crawled.iter().all(|p| p.measurement.value() >= 1));

    let stats = auditor.stats().unwrap();
    assert_eq!(stats.crawled_count, 2);
    assert_eq!(stats.sitemap_count, 0);
}

#[tokio::test]
async fn test_protocol_relative_links_rejected() {
    let server = MockServer::start().await;
    let base = server.uri();
    let authority = base.trim_start_matches("http:");

    mount(
        &server,
        "/",
        html(&format!(
            r#"<a href="{}/secret">Same host</a><a href="/public">Public</a>"#,
            authority
        )),
    )
    .await;
    mount(&server, "/public", html("<p>public</p>")).await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(html("<p>secret</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    let crawled = &auditor.session().crawled;
    assert_eq!(crawled.len(), 2);
    assert!(crawled.contains(format!("{}/public", base).as_str()));
    assert!(!crawled.contains(format!("{}/secret", base).as_str()));
}

#[tokio::test]
async fn test_server_error_recorded_without_following_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html(r#"<a href="/broken">Broken</a>"#)).await;
    mount(
        &server,
        "/broken",
        ResponseTemplate::new(500).set_body_raw(r#"<a href="/secret">hidden</a>"#, "text/html"),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(html("<p>never reached</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    let broken = auditor
        .session()
        .crawled
        .get(format!("{}/broken", base).as_str())
        .expect("500 page should be recorded");
    assert_eq!(broken.measurement, Measurement::ServerError(500));
    assert_eq!(broken.measurement.value(), -500);
    assert_eq!(auditor.session().crawled.len(), 2);
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/",
        html(r#"<a href="/a">A</a><a href="/b/">B</a><a href="/gone">Gone</a>"#),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(r#"<a href="/b">B</a><a href="/">Home</a><a href="/gone">Gone</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"<a href="/a/">A</a><a href="/gone/">Gone</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut auditor = auditor();
    auditor.crawl_site(&format!("{}/", base)).await.unwrap();

    assert_eq!(auditor.stats().unwrap().crawled_count, 3);
}

#[tokio::test]
async fn test_sitemap_index_expansion() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html("<p>no links</p>")).await;
    mount_robots(&server, "/sitemap_index.xml").await;
    mount(
        &server,
        "/sitemap_index.xml",
        xml(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap><loc>{base}/sitemap-posts.xml</loc></sitemap>
                <sitemap><loc>{base}/sitemap-pages.xml</loc></sitemap>
            </sitemapindex>"#
        )),
    )
    .await;
    mount(
        &server,
        "/sitemap-posts.xml",
        xml(format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc>{base}/posts/1</loc></url>
                <url><loc>{base}/posts/2/</loc></url>
            </urlset>"#
        )),
    )
    .await;
    mount(
        &server,
        "/sitemap-pages.xml",
        xml(format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <url><loc>{base}/contact</loc></url>
                <url><loc>{base}/team</loc></url>
            </urlset>"#
        )),
    )
    .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    let sitemap = &auditor.session().sitemap;
    assert_eq!(sitemap.len(), 4);
    for page in ["/posts/1", "/posts/2", "/contact", "/team"] {
        assert!(sitemap.contains(format!("{}{}", base, page).as_str()));
    }
    assert!(!sitemap.contains(format!("{}/sitemap-posts.xml", base).as_str()));
    assert!(!sitemap.contains(format!("{}/sitemap-pages.xml", base).as_str()));
}

#[tokio::test]
async fn test_sitemap_directive_at_start_of_robots_ignored() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html("<p>home</p>")).await;
    mount(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200).set_body_string(format!("Sitemap: {}/sitemap.xml\n", base)),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml(format!("<urlset><url><loc>{base}/x</loc></url></urlset>")))
        .expect(0)
        .mount(&server)
        .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    assert_eq!(auditor.stats().unwrap().sitemap_count, 0);
}

#[tokio::test]
async fn test_difference_reports() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/",
        html(r#"<a href="/shared">Shared</a><a href="/orphan">Orphan</a>"#),
    )
    .await;
    mount(&server, "/shared", html("<p>shared</p>")).await;
    mount(&server, "/orphan", html("<p>orphan</p>")).await;
    mount(&server, "/unlinked", html("<p>unlinked</p>")).await;
    mount_robots(&server, "/sitemap.xml").await;
    mount(
        &server,
        "/sitemap.xml",
        xml(format!(
            r#"<urlset>
                <url><loc>{base}/</loc></url>
                <url><loc>{base}/shared</loc></url>
                <url><loc>{base}/unlinked</loc></url>
            </urlset>"#
        )),
    )
    .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    assert_eq!(
        urls(&auditor.crawled_not_in_sitemap().unwrap()),
        vec![format!("{}/orphan", base)]
    );
    assert_eq!(
        urls(&auditor.sitemap_not_crawled().unwrap()),
        vec![format!("{}/unlinked", base)]
    );

    let stats = auditor.stats().unwrap();
    assert_eq!(stats.crawled_count, 3);
    assert_eq!(stats.sitemap_count, 3);
}

#[tokio::test]
async fn test_combined_timing_report_ordering() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html(r#"<a href="/fails">Fails</a>"#)).await;
    mount(&server, "/fails", ResponseTemplate::new(500)).await;
    mount(
        &server,
        "/report.pdf",
        ResponseTemplate::new(200).set_body_raw("%PDF", "application/pdf"),
    )
    .await;
    mount(&server, "/fresh", html("<p>only in sitemap</p>")).await;
    mount_robots(&server, "/sitemap.xml").await;
    mount(
        &server,
        "/sitemap.xml",
        xml(format!(
            r#"<urlset>
                <url><loc>{base}/missing</loc></url>
                <url><loc>{base}/report.pdf</loc></url>
                <url><loc>{base}/fresh</loc></url>
            </urlset>"#
        )),
    )
    .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();

    let timings = auditor.combined_timing_report().await.unwrap();
    let values: Vec<i64> = timings.iter().map(|p| p.measurement.value()).collect();

    assert_eq!(timings.len(), 5);
    assert_eq!(&values[..3], &[-500, -1, 0]);
    assert!(values[3] >= 1 && values[4] >= 1);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(timings[0].url(), format!("{}/fails", base));
    assert_eq!(timings[1].url(), format!("{}/missing", base));
    assert_eq!(timings[2].url(), format!("{}/report.pdf", base));

    let missing = auditor
        .session()
        .sitemap
        .get(format!("{}/missing", base).as_str())
        .unwrap();
    assert_eq!(missing.measurement, Measurement::OtherFailure);
}

#[tokio::test]
async fn test_audit_report_assembles_all_views() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html(r#"<a href="/a">A</a>"#)).await;
    mount(&server, "/a", html("<p>a</p>")).await;
    mount(&server, "/b", html("<p>b</p>")).await;
    mount_robots(&server, "/sitemap.xml").await;
    mount(
        &server,
        "/sitemap.xml",
        xml(format!("<urlset><url><loc>{base}/b</loc></url></urlset>")),
    )
    .await;

    let mut auditor = auditor();
    auditor.crawl_site(&base).await.unwrap();
    let report = auditor
        .audit_report(&base, Some("deadbeef".to_string()))
        .await
        .unwrap();

    assert_eq!(report.origin, base);
    assert_eq!(report.config_hash.as_deref(), Some("deadbeef"));
    assert_eq!(report.crawled_not_in_sitemap.len(), 2);
    assert_eq!(urls(&report.sitemap_not_crawled), vec![format!("{}/b", base)]);
    assert_eq!(report.timings.len(), 3);
    assert_eq!(report.stats.crawled_count, 2);
    assert_eq!(report.stats.sitemap_count, 1);
}

#[tokio::test]
async fn test_reports_require_completed_crawl() {
    let mut auditor = auditor();

    assert!(matches!(auditor.stats(), Err(AuditError::NotReady)));
    assert!(matches!(
        auditor.combined_timing_report().await,
        Err(AuditError::NotReady)
    ));
}

#[tokio::test]
async fn test_invalid_root_urls_rejected() {
    let mut auditor = auditor();

    for input in ["ftp://example.com", "file:///tmp/index.html", "/relative", "example"] {
        let result = auditor.crawl_site(input).await;
        assert!(
            matches!(result, Err(AuditError::InvalidInput(_))),
            "{} should be rejected",
            input
        );
        assert!(matches!(auditor.stats(), Err(AuditError::NotReady)));
    }
}

#[tokio::test]
async fn test_transport_failure_resets_session() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);

    let mut auditor = auditor();
    let result = auditor.crawl_site(&format!("http://{}", addr)).await;

    assert!(matches!(
        result,
        Err(AuditError::UnsupportedTransport { .. })
    ));
    assert!(!auditor.is_ready());
    assert!(auditor.session().crawled.is_empty());
}

#[tokio::test]
async fn test_reset_and_recrawl_discard_previous_state() {
    let first = MockServer::start().await;
    mount(&first, "/", html(r#"<a href="/one">1</a><a href="/two">2</a>"#)).await;
    mount(&first, "/one", html("<p>1</p>")).await;
    mount(&first, "/two", html("<p>2</p>")).await;

    let second = MockServer::start().await;
    mount(&second, "/", html("<p>alone</p>")).await;

    let mut auditor = auditor();
    auditor.crawl_site(&first.uri()).await.unwrap();
    assert_eq!(auditor.stats().unwrap().crawled_count, 3);

    auditor.reset();
    assert!(matches!(auditor.stats(), Err(AuditError::NotReady)));

    auditor.crawl_site(&second.uri()).await.unwrap();
    let crawled = &auditor.session().crawled;
    assert_eq!(crawled.len(), 1);
    assert!(crawled.iter().all(|p| p.url().starts_with(&second.uri())));
}
