use crate::UrlError;
use std::fmt;
use url::Url;

/// Schemes a root URL may use
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// The site a crawl session is scoped to
///
/// The prefix is `scheme://host` with a non-default port appended, and every
/// URL recorded during a session starts with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    prefix: String,
}

impl Origin {
    /// Builds the origin of an already-parsed absolute URL
    ///
    /// # Returns
    ///
    /// * `Ok(Origin)` - The URL uses http(s) and has a host
    /// * `Err(UrlError)` - The URL is a file URL, uses another scheme, or has no host
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        if url.scheme() == "file" {
            return Err(UrlError::FileUrl(url.to_string()));
        }

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| UrlError::MissingHost(url.to_string()))?
            .to_lowercase();

        let prefix = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            prefix,
        })
    }

    /// The URL scheme (`http` or `https`)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The lowercase host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `scheme://host[:port]`, with no trailing slash
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Location of the site's robots.txt
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.prefix)
    }

    /// Returns true if `candidate` lies under this origin
    ///
    /// The prefix must be followed by the end of the string or a path, query,
    /// or fragment delimiter, so `http://example.com.evil.org` is off-site.
    pub fn contains(&self, candidate: &str) -> bool {
        match candidate.strip_prefix(self.prefix.as_str()) {
            Some(rest) => {
                rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('?')
                    || rest.starts_with('#')
            }
            None => false,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}
