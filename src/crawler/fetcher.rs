//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the auditor, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Timed GET requests for crawled and re-measured pages
//! - Plain-text GET requests for robots.txt and sitemap documents
//! - Classifying responses by status and Content-Type
//!
//! Requests are issued one at a time; every call awaits its response before
//! returning. Transport failures are surfaced as
//! [`AuditError::UnsupportedTransport`], HTTP-level failures as data.

use crate::config::Config;
use crate::state::Measurement;
use crate::AuditError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, Response, StatusCode};
use std::time::{Duration, Instant};

/// The only failure status that is recorded in the crawled set
const RECORDED_FAILURE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response with an HTML media type
    Html {
        /// Time from request start to response headers
        elapsed: Duration,
        /// Page body, when it was requested
        body: Option<String>,
    },

    /// 2xx response that is not HTML
    NonHtml {
        /// The Content-Type received, if any
        content_type: Option<String>,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },
}

impl FetchResult {
    /// Measurement recorded for a page reached by crawling
    ///
    /// Only HTML pages and internal server errors produce a record; every
    /// other outcome drops the page from the crawled set.
    pub fn crawl_record(&self) -> Option<Measurement> {
        match self {
            Self::Html { elapsed, .. } => Some(Measurement::elapsed(*elapsed)),
            Self::HttpError { status_code } if *status_code == RECORDED_FAILURE.as_u16() => {
                Some(Measurement::ServerError(*status_code))
            }
            _ => None,
        }
    }

    /// Measurement written onto a sitemap page that was re-fetched for timing
    ///
    /// Returns `None` for a successful non-HTML response, which leaves the
    /// existing measurement untouched.
    pub fn probe_measurement(&self) -> Option<Measurement> {
        match self {
            Self::Html { elapsed, .. } => Some(Measurement::elapsed(*elapsed)),
            Self::NonHtml { .. } => None,
            Self::HttpError { status_code } if *status_code == RECORDED_FAILURE.as_u16() => {
                Some(Measurement::ServerError(*status_code))
            }
            Self::HttpError { .. } => Some(Measurement::OtherFailure),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use sitemap_audit::config::Config;
/// use sitemap_audit::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let redirect = if config.http.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.http.max_redirects)
    };

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and reads its body if it is HTML
///
/// # Returns
///
/// * `Ok(FetchResult)` - The classified response
/// * `Err(AuditError::UnsupportedTransport)` - The request or body read failed
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchResult, AuditError> {
    fetch_classified(client, url, true).await
}

/// Fetches a page for timing only; the body is never read
pub async fn probe_page(client: &Client, url: &str) -> Result<FetchResult, AuditError> {
    fetch_classified(client, url, false).await
}

/// Fetches a text resource, returning `None` for any non-success status
///
/// Used for robots.txt and sitemap documents, where a missing resource is
/// not an error.
pub async fn fetch_text(client: &Client, url: &str) -> Result<Option<String>, AuditError> {
    let response = send(client, url).await?;

    if !response.status().is_success() {
        tracing::debug!("{} answered {}", url, response.status());
        return Ok(None);
    }

    let text = response.text().await.map_err(|e| transport(url, e))?;
    Ok(Some(text))
}

async fn fetch_classified(
    client: &Client,
    url: &str,
    read_body: bool,
) -> Result<FetchResult, AuditError> {
    let started = Instant::now();
    let response = send(client, url).await?;
    let elapsed = started.elapsed();

    let status = response.status();
    if !status.is_success() {
        return Ok(FetchResult::HttpError {
            status_code: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if !content_type.as_deref().map(is_html_media_type).unwrap_or(false) {
        return Ok(FetchResult::NonHtml { content_type });
    }

    let body = if read_body {
        Some(response.text().await.map_err(|e| transport(url, e))?)
    } else {
        None
    };

    Ok(FetchResult::Html {
        elapsed,
        body,
    })
}

async fn send(client: &Client, url: &str) -> Result<Response, AuditError> {
    client
        .get(url)
        .send()
        .await
        .map_err(|e| transport(url, e))
}

fn transport(url: &str, source: reqwest::Error) -> AuditError {
    AuditError::UnsupportedTransport {
        url: url.to_string(),
        source,
    }
}

/// Returns true if a Content-Type header names exactly the `text/html` media type
///
/// Parameters such as `charset` are ignored; the comparison is case-insensitive.
pub fn is_html_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}
