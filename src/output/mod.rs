//! Output module for audit reports
//!
//! This module handles:
//! - Set algebra between the crawled and sitemap page sets
//! - Fixed-width console tables
//! - Markdown report export
//! - Crawl statistics

mod markdown;
mod report;
pub mod stats;
mod table;
mod views;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{
    render_report, AuditReport, OutputError, OutputResult, CRAWLED_NOT_IN_SITEMAP_HEADER,
    SITEMAP_NOT_CRAWLED_HEADER,
};
pub use stats::{format_statistics, print_statistics, CrawlStats};
pub use table::{render_page_table, render_timing_table, TABLE_WIDTH};
pub use views::{combined_timing, difference};
