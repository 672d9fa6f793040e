//! State module for tracking crawl results
//!
//! This module provides the page record and the per-run session state.
//!
//! # Components
//!
//! - `WebPage`: A canonical URL identified page with its latest `Measurement`
//! - `Measurement`: Signed latency/failure encoding used in reports
//! - `CrawlSession`: Origin, crawled set, sitemap set and the busy/ready phase

mod session;
mod web_page;

// Re-export main types
pub use session::{CrawlSession, SessionPhase};
pub use web_page::{Measurement, WebPage};
