//! Page record definitions for crawl and sitemap results
//!
//! A `WebPage` is identified by its canonical URL alone; the attached
//! `Measurement` is mutable metadata that never takes part in equality.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Outcome of measuring a single page fetch
///
/// Each variant maps onto one integer domain of the report encoding:
/// `0` for unset, positive milliseconds for a successful HTML fetch, and a
/// negative code for failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Measurement {
    /// Never measured (sitemap entries start here)
    #[default]
    Unset,

    /// Successful HTML fetch, elapsed milliseconds (always >= 1)
    Elapsed(u64),

    /// Server answered with the given 5xx status, encoded as its negation
    ServerError(u16),

    /// Any other non-success response, encoded as `-1`
    OtherFailure,
}

impl Measurement {
    /// Builds an elapsed measurement, clamped so it never collides with `Unset`
    pub fn elapsed(duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self::Elapsed(millis.max(1))
    }

    /// Returns the signed integer encoding used for ordering and display
    pub fn value(&self) -> i64 {
        match self {
            Self::Unset => 0,
            Self::Elapsed(ms) => i64::try_from(*ms).unwrap_or(i64::MAX),
            Self::ServerError(status) => -i64::from(*status),
            Self::OtherFailure => -1,
        }
    }

    /// Returns true if this records a failed fetch
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ServerError(_) | Self::OtherFailure)
    }

    /// Returns true if no measurement has been taken
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.value())
    }
}

/// A canonical, origin-scoped URL plus its latest measurement
#[derive(Debug, Clone)]
pub struct WebPage {
    url: String,
    pub measurement: Measurement,
}

impl WebPage {
    /// Creates an unmeasured page
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_measurement(url, Measurement::Unset)
    }

    /// Creates a page carrying a measurement
    pub fn with_measurement(url: impl Into<String>, measurement: Measurement) -> Self {
        Self {
            url: url.into(),
            measurement,
        }
    }

    /// The canonical URL identifying this page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Report ordering: measurement ascending, then URL
    ///
    /// Unlike equality this is a total order over both fields, so sorting a
    /// report is deterministic even when several pages share a measurement.
    pub fn cmp_by_timing(&self, other: &Self) -> Ordering {
        self.measurement
            .value()
            .cmp(&other.measurement.value())
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl PartialEq for WebPage {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for WebPage {}

impl Hash for WebPage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

// Lets sets of pages be probed with a plain `&str`; consistent with Hash/Eq above.
impl Borrow<str> for WebPage {
    fn borrow(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for WebPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
