//! HTML link extraction
//!
//! Pulls raw `href` values out of anchor tags. Resolution and scoping happen
//! later in the `url` module, so values are returned exactly as written
//! (apart from surrounding whitespace).

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Extracts the set of raw `href` values from `<a>` tags
///
/// Parsing is forgiving: malformed markup still yields whatever anchors the
/// HTML parser recovers, and a document without anchors yields an empty set.
/// Tag and attribute names match case-insensitively, attribute order does not
/// matter, and when an anchor repeats `href` only the first one counts.
/// Empty values are skipped.
///
/// # Example
///
/// ```
/// use sitemap_audit::crawler::extract_hrefs;
///
/// let html = r#"<A class="nav" HREF='/about'>About</A><a href="/about">Again</a>"#;
/// let hrefs = extract_hrefs(html);
/// assert_eq!(hrefs.len(), 1);
/// assert!(hrefs.contains("/about"));
/// ```
pub fn extract_hrefs(html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return HashSet::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
