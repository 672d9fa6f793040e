//! Audit report types
//!
//! An [`AuditReport`] is a snapshot of every view over one completed crawl,
//! ready to be printed or exported.

use crate::output::stats::CrawlStats;
use crate::output::table::{render_page_table, render_timing_table};
use crate::state::WebPage;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Header of the crawled-not-in-sitemap table
pub const CRAWLED_NOT_IN_SITEMAP_HEADER: &str =
    "Urls FOUNDED BY CRAWLING THE WEBSITE but not in sitemap.xml";

/// Header of the sitemap-not-crawled table
pub const SITEMAP_NOT_CRAWLED_HEADER: &str =
    "Urls FOUNDED IN SITEMAP.XML but not founded after crawling a web site";

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// All views of one completed audit
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// The root URL as given by the user
    pub root_url: String,

    /// Origin prefix every listed URL starts with
    pub origin: String,

    /// When the report was assembled
    pub generated_at: DateTime<Utc>,

    /// Hash of the configuration file, when one was loaded
    pub config_hash: Option<String>,

    /// Crawled pages the sitemap does not list, sorted by URL
    pub crawled_not_in_sitemap: Vec<WebPage>,

    /// Sitemap pages the crawl did not reach, sorted by URL
    pub sitemap_not_crawled: Vec<WebPage>,

    /// Every known page with its measurement, in report order
    pub timings: Vec<WebPage>,

    pub stats: CrawlStats,
}

/// Renders the three console tables for a report, separated by blank lines
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    out.push_str(&render_page_table(
        CRAWLED_NOT_IN_SITEMAP_HEADER,
        &report.crawled_not_in_sitemap,
    ));
    out.push_str("\n\n");
    out.push_str(&render_page_table(
        SITEMAP_NOT_CRAWLED_HEADER,
        &report.sitemap_not_crawled,
    ));
    out.push_str("\n\n");
    out.push_str(&render_timing_table(&report.timings));
    out.push('\n');
    out
}
