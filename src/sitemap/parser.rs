//! Streaming sitemap XML parser
//!
//! The first element decides the document kind; every `<loc>` after it
//! contributes one location. Location text may arrive split across text,
//! entity and CDATA events, so it is accumulated until `</loc>`.

use crate::sitemap::SitemapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Kind of sitemap document, decided by its root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<urlset>`: locations are pages
    UrlSet,

    /// `<sitemapindex>`: locations are further sitemap documents
    Index,
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub kind: SitemapKind,

    /// Raw `<loc>` values in document order, whitespace-trimmed
    pub locations: Vec<String>,
}

/// Parses a sitemap or sitemap-index document
///
/// # Returns
///
/// * `Ok(ParsedSitemap)` - The document kind and its locations
/// * `Err(SitemapError::NotASitemap)` - The first element is neither `urlset`
///   nor `sitemapindex`
/// * `Err(SitemapError::Empty)` - The document has no elements
/// * `Err(SitemapError::Xml)` - The document is not well-formed
///
/// # Example
///
/// ```
/// use sitemap_audit::sitemap::{parse_sitemap, SitemapKind};
///
/// let xml = r#"<?xml version="1.0"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/a</loc></url>
/// </urlset>"#;
/// let parsed = parse_sitemap(xml).unwrap();
/// assert_eq!(parsed.kind, SitemapKind::UrlSet);
/// assert_eq!(parsed.locations, vec!["https://example.com/a"]);
/// ```
pub fn parse_sitemap(xml: &str) -> Result<ParsedSitemap, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let kind = loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                break match e.local_name().as_ref() {
                    b"urlset" => SitemapKind::UrlSet,
                    b"sitemapindex" => SitemapKind::Index,
                    other => {
                        return Err(SitemapError::NotASitemap(
                            String::from_utf8_lossy(other).into_owned(),
                        ))
                    }
                };
            }
            Event::Eof => return Err(SitemapError::Empty),
            _ => {}
        }
    };

    let mut locations = Vec::new();
    let mut in_loc = false;
    let mut current = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"loc" => {
                in_loc = true;
                current.clear();
            }
            Event::End(e) if e.local_name().as_ref() == b"loc" => {
                in_loc = false;
                let value = current.trim();
                if !value.is_empty() {
                    locations.push(value.to_string());
                }
                current.clear();
            }
            Event::Text(text) if in_loc => current.push_str(&text.unescape()?),
            Event::CData(data) if in_loc => {
                current.push_str(&String::from_utf8_lossy(&data.into_inner()))
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ParsedSitemap { kind, locations })
}
