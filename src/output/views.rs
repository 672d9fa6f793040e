//! Set algebra over crawled and sitemap pages
//!
//! Pages are keyed by URL only, so a page present in both sets is the same
//! page regardless of measurement. Difference views are sorted by URL;
//! the timing view uses [`WebPage::cmp_by_timing`].

use crate::state::WebPage;
use std::collections::HashSet;

/// Pages in `left` whose URL is absent from `right`, sorted by URL
pub fn difference(left: &HashSet<WebPage>, right: &HashSet<WebPage>) -> Vec<WebPage> {
    let mut pages: Vec<WebPage> = left.difference(right).cloned().collect();
    pages.sort_by(|a, b| a.url().cmp(b.url()));
    pages
}

/// Union of `crawled` and `extra`, sorted for the timing report
///
/// Where a URL appears in both, the crawled page (and its measurement) wins.
pub fn combined_timing(crawled: &HashSet<WebPage>, extra: &HashSet<WebPage>) -> Vec<WebPage> {
    let mut pages: Vec<WebPage> = crawled.union(extra).cloned().collect();
    pages.sort_by(WebPage::cmp_by_timing);
    pages
}
