//! Sitemap resolution module
//!
//! This module turns a site's declared sitemap into the set of pages it lists:
//! - Locating the sitemap through robots.txt
//! - Parsing `urlset` and `sitemapindex` documents
//! - Expanding one level of sitemap index into its child sitemaps
//!
//! Failures to fetch or parse an individual sitemap document are logged and
//! the document is skipped. Transport failures on robots.txt are not.

mod parser;

pub use parser::{parse_sitemap, ParsedSitemap, SitemapKind};

use crate::crawler::fetch_text;
use crate::robots::fetch_sitemap_location;
use crate::state::WebPage;
use crate::url::{normalize_sitemap_loc, Origin};
use crate::AuditError;
use reqwest::Client;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while parsing a sitemap document
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Malformed sitemap XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Not a sitemap document (root element <{0}>)")]
    NotASitemap(String),

    #[error("Sitemap document contains no elements")]
    Empty,
}

/// Resolves the site's sitemap into `sitemap`
///
/// # Steps
///
/// 1. Read the `Sitemap:` directive from robots.txt; stop if there is none
/// 2. Parse the declared document and insert its normalized locations
/// 3. If it was an index, replace the collected child sitemap URLs with the
///    pages listed in each child
///
/// # Returns
///
/// * `Ok(())` - Resolution finished, possibly with an empty set
/// * `Err(AuditError::UnsupportedTransport)` - robots.txt could not be fetched
pub async fn resolve_sitemap(
    client: &Client,
    origin: &Origin,
    sitemap: &mut HashSet<WebPage>,
) -> Result<(), AuditError> {
    let location = match fetch_sitemap_location(client, origin).await? {
        Some(location) => location,
        None => return Ok(()),
    };

    let document = match load_document(client, &location).await {
        Some(document) => document,
        None => return Ok(()),
    };

    insert_locations(&document.locations, origin, sitemap);

    if document.kind == SitemapKind::Index {
        let mut children: Vec<String> = sitemap.drain().map(|page| page.url().to_string()).collect();
        children.sort();
        tracing::info!("Expanding sitemap index with {} children", children.len());

        for child in children {
            let Some(child_document) = load_document(client, &child).await else {
                continue;
            };

            if child_document.kind == SitemapKind::Index {
                tracing::warn!("Skipping nested sitemap index {}", child);
                continue;
            }

            insert_locations(&child_document.locations, origin, sitemap);
        }
    }

    tracing::info!("Sitemap lists {} pages", sitemap.len());
    Ok(())
}

/// Fetches and parses one sitemap document, logging and absorbing failures
async fn load_document(client: &Client, url: &str) -> Option<ParsedSitemap> {
    tracing::debug!("Fetching sitemap {}", url);

    let body = match fetch_text(client, url).await {
        Ok(Some(body)) => body,
        Ok(None) => {
            tracing::warn!("Sitemap {} is unavailable", url);
            return None;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch sitemap {}: {}", url, e);
            return None;
        }
    };

    match parse_sitemap(&body) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::warn!("Failed to parse sitemap {}: {}", url, e);
            None
        }
    }
}

fn insert_locations(locations: &[String], origin: &Origin, sitemap: &mut HashSet<WebPage>) {
    for loc in locations {
        match normalize_sitemap_loc(loc, origin) {
            Some(url) => {
                sitemap.insert(WebPage::new(url));
            }
            None => tracing::debug!("Skipping unparsable sitemap location {}", loc),
        }
    }
}
