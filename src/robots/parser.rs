//! Sitemap directive extraction from robots.txt content
//!
//! Only the `Sitemap:` directive is read; allow/disallow rules are not
//! interpreted.

/// The directive token searched for
const SITEMAP_TOKEN: &str = "Sitemap:";

/// Extracts the sitemap URL declared in robots.txt content
///
/// The first occurrence of `Sitemap:` anywhere in the text is used (it need
/// not start a line). The value runs from after the token, minus leading
/// spaces, up to the first newline, minus trailing spaces and carriage returns.
///
/// A token found at index 0 is treated as absent. Blank content, a missing
/// token, and an empty value also yield `None`.
///
/// # Example
///
/// ```
/// use sitemap_audit::robots::sitemap_directive;
///
/// let robots = "User-agent: *\nSitemap: https://example.com/sitemap.xml\n";
/// assert_eq!(
///     sitemap_directive(robots),
///     Some("https://example.com/sitemap.xml".to_string())
/// );
/// assert_eq!(sitemap_directive("Sitemap: https://example.com/sitemap.xml"), None);
/// ```
pub fn sitemap_directive(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }

    let position = match content.find(SITEMAP_TOKEN) {
        Some(0) | None => return None,
        Some(position) => position,
    };

    let value = content[position + SITEMAP_TOKEN.len()..]
        .trim_start_matches(' ')
        .split('\n')
        .next()
        .unwrap_or("")
        .trim_end_matches([' ', '\r']);

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
