//! Sitemap-Audit: a single-site crawler that cross-checks a site against its sitemap
//!
//! This crate crawls every internally-linked page reachable from a root URL,
//! resolves the site's declared sitemap via robots.txt, and reports pages that
//! appear in only one of the two sets together with per-page response latency.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{0}")]
    InvalidInput(#[from] UrlError),

    #[error("Custom encodings are not supported (transport failure for {url}: {source})")]
    UnsupportedTransport { url: String, source: reqwest::Error },

    #[error("Reports are unavailable until a crawl has completed successfully")]
    NotReady,

    #[error("A crawl is already in progress; reset the session first")]
    Busy,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors raised while validating a root URL
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Error! Invalid link given: {0}")]
    Parse(String),

    #[error("Error! Link must support http or https scheme, got: {0}")]
    InvalidScheme(String),

    #[error("Error! Link must not be a file: {0}")]
    FileUrl(String),

    #[error("Error! Link has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Sitemap-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Auditor;
pub use output::CrawlStats;
pub use state::{Measurement, WebPage};
pub use url::Origin;
