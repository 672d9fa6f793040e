//! Crawler module for page discovery and measurement
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with response classification and timing
//! - HTML link extraction
//! - The worklist-driven crawl loop
//! - Audit orchestration and report views

mod auditor;
mod engine;
mod fetcher;
mod parser;

pub use auditor::Auditor;
pub use engine::{crawl_pages, CrawlProgress};
pub use fetcher::{
    build_http_client, fetch_page, fetch_text, is_html_media_type, probe_page, FetchResult,
};
pub use parser::extract_hrefs;
