use crate::url::Origin;
use crate::UrlError;
use url::{ParseError, Url};

/// Result of turning a raw `href` value into a crawl candidate
///
/// Malformed hrefs never fail the crawl: they are carried forward as the raw
/// trimmed string and left for the scope filter to accept or drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// Parsed and reduced to scheme, authority and path
    Resolved(String),

    /// Not a URI reference at all; best-effort raw value
    Unparsable(String),
}

impl Href {
    /// The candidate string to push onto the worklist
    pub fn into_candidate(self) -> String {
        match self {
            Self::Resolved(s) | Self::Unparsable(s) => s,
        }
    }
}

/// Validates a user-supplied root URL and derives the session origin
///
/// The input is trimmed and must parse as an absolute `http`/`https` URL that
/// is not a file URL.
///
/// # Returns
///
/// * `Ok((Origin, String))` - The origin and the canonical seed URL
/// * `Err(UrlError)` - The input is not an acceptable root URL
///
/// # Examples
///
/// ```
/// use sitemap_audit::url::parse_root_url;
///
/// let (origin, seed) = parse_root_url("https://Example.com/docs/?page=2").unwrap();
/// assert_eq!(origin.prefix(), "https://example.com");
/// assert_eq!(seed, "https://example.com/docs");
/// ```
pub fn parse_root_url(input: &str) -> Result<(Origin, String), UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty input".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;
    let origin = Origin::from_url(&url)?;
    let seed = canonical(&url);

    Ok((origin, seed))
}

/// Resolves a raw anchor `href` against the origin
///
/// # Resolution Rules
///
/// 1. Absolute URIs keep scheme, authority and path; query and fragment are dropped
/// 2. Relative references are resolved against `prefix + "/"`, then reduced the same way
/// 3. Anything else is kept as the raw trimmed value
///
/// One trailing slash is stripped in every case. Protocol-relative hrefs
/// (`//host/path`) are never resolved; they stay raw so the scope filter
/// rejects them.
pub fn resolve_href(raw: &str, origin: &Origin) -> Href {
    let raw = raw.trim();

    if raw.starts_with("//") {
        return Href::Unparsable(raw.to_string());
    }

    match Url::parse(raw) {
        Ok(url) => Href::Resolved(canonical(&url)),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let resolved = Url::parse(&format!("{}/", origin.prefix()))
                .and_then(|base| base.join(raw));
            match resolved {
                Ok(url) => Href::Resolved(canonical(&url)),
                Err(_) => Href::Unparsable(strip_trailing_slash(raw).to_string()),
            }
        }
        Err(_) => Href::Unparsable(strip_trailing_slash(raw).to_string()),
    }
}

/// Applies the scope filter to a worklist candidate
///
/// # Filter Steps
///
/// 1. Protocol-relative (`//host/...`) candidates are rejected
/// 2. Root-relative (`/path`) candidates get the origin prefix prepended
/// 3. Candidates outside the origin are rejected
/// 4. One trailing slash is stripped
///
/// # Returns
///
/// * `Some(String)` - The in-scope URL
/// * `None` - The candidate is off-site or ambiguous
pub fn scope_candidate(candidate: &str, origin: &Origin) -> Option<String> {
    if candidate.starts_with("//") {
        return None;
    }

    let absolute = if candidate.starts_with('/') {
        format!("{}{}", origin.prefix(), candidate)
    } else {
        candidate.to_string()
    };

    if !origin.contains(&absolute) {
        return None;
    }

    Some(strip_trailing_slash(&absolute).to_string())
}

/// Normalizes a sitemap `<loc>` value onto the origin
///
/// Only the path of the location is kept; it is re-joined onto the origin
/// prefix, so every sitemap entry is in scope by construction. The root path
/// maps to the bare prefix.
///
/// Returns `None` if the value does not parse as an absolute URL.
pub fn normalize_sitemap_loc(loc: &str, origin: &Origin) -> Option<String> {
    let trimmed = strip_trailing_slash(loc.trim());
    let url = Url::parse(trimmed).ok()?;
    let path = url.path();

    if path.len() > 1 {
        Some(format!("{}{}", origin.prefix(), path))
    } else {
        Some(origin.prefix().to_string())
    }
}

/// Reduces a parsed URL to scheme, authority and path without a trailing slash
fn canonical(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    strip_trailing_slash(url.as_str()).to_string()
}

/// Strips exactly one trailing `/`
fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}
