//! Robots.txt handling module
//!
//! This module fetches a site's robots.txt and locates the sitemap it
//! declares. Crawl rules in the file are not applied.

mod parser;

pub use parser::sitemap_directive;

use crate::crawler::fetch_text;
use crate::url::Origin;
use crate::AuditError;
use reqwest::Client;

/// Fetches robots.txt for the origin and returns its sitemap location
///
/// # Returns
///
/// * `Ok(Some(String))` - The declared sitemap URL
/// * `Ok(None)` - robots.txt is missing, empty, or declares no sitemap
/// * `Err(AuditError)` - The request failed below HTTP
pub async fn fetch_sitemap_location(
    client: &Client,
    origin: &Origin,
) -> Result<Option<String>, AuditError> {
    let robots_url = origin.robots_url();
    tracing::debug!("Fetching robots.txt: {}", robots_url);

    let content = match fetch_text(client, &robots_url).await? {
        Some(content) => content,
        None => {
            tracing::info!("No robots.txt available at {}", robots_url);
            return Ok(None);
        }
    };

    let location = sitemap_directive(&content);
    match &location {
        Some(url) => tracing::info!("robots.txt declares sitemap {}", url),
        None => tracing::info!("robots.txt at {} declares no sitemap", robots_url),
    }

    Ok(location)
}
