//! Worklist-driven page discovery
//!
//! The engine walks a single worklist seeded with the root URL. Each popped
//! candidate goes through the scope filter, is fetched at most once, and, if
//! it is HTML, contributes its links back onto the worklist. The loop ends
//! when the worklist is empty.

use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::parser::extract_hrefs;
use crate::state::WebPage;
use crate::url::{resolve_href, scope_candidate, Origin};
use crate::AuditError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Instant;

/// Counters describing one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlProgress {
    /// HTTP requests issued
    pub pages_fetched: usize,

    /// Pages added to the crawled set
    pub pages_recorded: usize,

    /// Candidates dropped by the scope filter
    pub out_of_scope: usize,

    /// Fetched pages that were not HTML
    pub non_html: usize,
}

/// Crawls every in-scope page reachable from `seed`
///
/// # Traversal
///
/// 1. Pop a candidate (most recently pushed first)
/// 2. Apply the scope filter; drop the candidate if it is off-site
/// 3. Skip URLs already in `crawled` or already fetched in this traversal
/// 4. Fetch and classify:
///    - 2xx HTML: record elapsed time, extract and resolve links onto the worklist
///    - 2xx non-HTML: no record, no links
///    - 500: record a server-error measurement, no links
///    - any other status: no record, no links
///
/// Traversal is bounded only by the site itself; a site that generates
/// unbounded distinct URLs will not terminate.
///
/// # Returns
///
/// * `Ok(CrawlProgress)` - Worklist exhausted
/// * `Err(AuditError::UnsupportedTransport)` - A request failed below HTTP; the
///   traversal is abandoned
pub async fn crawl_pages(
    client: &Client,
    origin: &Origin,
    seed: &str,
    crawled: &mut HashSet<WebPage>,
) -> Result<CrawlProgress, AuditError> {
    let started = Instant::now();
    let mut progress = CrawlProgress::default();
    let mut worklist = vec![seed.to_string()];
    let mut attempted: HashSet<String> = HashSet::new();

    while let Some(candidate) = worklist.pop() {
        let url = match scope_candidate(&candidate, origin) {
            Some(url) => url,
            None => {
                tracing::trace!("Out of scope: {}", candidate);
                progress.out_of_scope += 1;
                continue;
            }
        };

        if crawled.contains(url.as_str()) || !attempted.insert(url.clone()) {
            continue;
        }

        tracing::debug!("Fetching {}", url);
        let result = fetch_page(client, &url).await?;
        progress.pages_fetched += 1;

        if let Some(measurement) = result.crawl_record() {
            crawled.insert(WebPage::with_measurement(url.clone(), measurement));
            progress.pages_recorded += 1;
        }

        match result {
            FetchResult::Html {
                body: Some(body), ..
            } => {
                for href in extract_hrefs(&body) {
                    worklist.push(resolve_href(&href, origin).into_candidate());
                }
            }
            FetchResult::Html { body: None, .. } => {}
            FetchResult::NonHtml { content_type } => {
                tracing::debug!(
                    "Skipping non-HTML page {} ({})",
                    url,
                    content_type.as_deref().unwrap_or("no content type")
                );
                progress.non_html += 1;
            }
            FetchResult::HttpError { status_code } => {
                tracing::debug!("{} answered HTTP {}", url, status_code);
            }
        }

        if progress.pages_fetched % 10 == 0 {
            tracing::info!(
                "Progress: {} pages fetched, {} recorded, {} pending",
                progress.pages_fetched,
                progress.pages_recorded,
                worklist.len()
            );
        }
    }

    tracing::info!(
        "Crawl of {} finished: {} fetched, {} recorded in {:?}",
        origin,
        progress.pages_fetched,
        progress.pages_recorded,
        started.elapsed()
    );

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
    }

    #[tokio::test]
    async fn test_not_found_page_fetched_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(
                r#"<a href="/missing">a</a><a href="/hub">b</a><a href="/missing/">c</a>"#,
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/hub"))
            .respond_with(html(r#"<a href="/missing">again</a><a href="/">home</a>"#))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let origin = Origin::from_url(&Url::parse(&server.uri()).unwrap()).unwrap();
        let client = Client::new();
        let mut crawled = HashSet::new();

        let progress = crawl_pages(&client, &origin, origin.prefix(), &mut crawled)
            .await
            .unwrap();

        assert_eq!(progress.pages_fetched, 3);
        assert_eq!(progress.pages_recorded, 2);
        assert_eq!(crawled.len(), 2);
        assert!(crawled.contains(origin.prefix()));
        assert!(crawled.contains(format!("{}/hub", origin.prefix()).as_str()));
    }

    #[tokio::test]
    async fn test_non_html_not_recorded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(r#"<a href="/report.pdf">pdf</a>"#))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<a href="/hidden">not followed</a>"#,
                "application/pdf",
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/hidden"))
            .respond_with(html("<p>hidden</p>"))
            .expect(0)
            .mount(&server)
            .await;

        let origin = Origin::from_url(&Url::parse(&server.uri()).unwrap()).unwrap();
        let mut crawled = HashSet::new();

        let progress = crawl_pages(&Client::new(), &origin, origin.prefix(), &mut crawled)
            .await
            .unwrap();

        assert_eq!(progress.non_html, 1);
        assert_eq!(crawled.len(), 1);
    }

    #[tokio::test]
    async fn test_protocol_relative_href_not_followed() {
        let server = MockServer::start().await;
        let origin = Origin::from_url(&Url::parse(&server.uri()).unwrap()).unwrap();
        let authority = origin.prefix().trim_start_matches("http:");

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(&format!(r#"<a href="{}/secret">same host</a>"#, authority)))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/secret"))
            .respond_with(html("<p>secret</p>"))
            .expect(0)
            .mount(&server)
            .await;

        let mut crawled = HashSet::new();
        let progress = crawl_pages(&Client::new(), &origin, origin.prefix(), &mut crawled)
            .await
            .unwrap();

        assert_eq!(progress.pages_fetched, 1);
        assert_eq!(progress.out_of_scope, 1);
        assert_eq!(crawled.len(), 1);
        assert!(!crawled.contains(format!("{}/secret", origin.prefix()).as_str()));
    }

    #[tokio::test]
    async fn test_offsite_seed_fetches_nothing() {
        let server = MockServer::start().await;
        let origin = Origin::from_url(&Url::parse(&server.uri()).unwrap()).unwrap();
        let mut crawled = HashSet::new();

        let progress = crawl_pages(&Client::new(), &origin, "http://elsewhere.test", &mut crawled)
            .await
            .unwrap();

        assert_eq!(progress.pages_fetched, 0);
        assert_eq!(progress.out_of_scope, 1);
        assert!(crawled.is_empty());
    }
}
