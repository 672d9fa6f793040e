use crate::state::WebPage;
use crate::url::Origin;
use std::collections::HashSet;

/// Lifecycle of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Nothing crawled yet, or the session was reset
    #[default]
    Idle,

    /// A crawl is running; another may not start
    Crawling,

    /// Crawl and sitemap resolution completed; reports may be built
    Ready,
}

/// All mutable state of one crawl run
///
/// Exactly one session is active per auditor. `reset` discards everything,
/// including the origin, so a new crawl never sees results from a previous one.
#[derive(Debug, Default)]
pub struct CrawlSession {
    origin: Option<Origin>,

    /// Pages discovered by following links
    pub crawled: HashSet<WebPage>,

    /// Pages declared by the sitemap
    pub sitemap: HashSet<WebPage>,

    phase: SessionPhase,
}

impl CrawlSession {
    /// Creates an empty, idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all state back to idle
    pub fn reset(&mut self) {
        self.origin = None;
        self.crawled.clear();
        self.sitemap.clear();
        self.phase = SessionPhase::Idle;
    }

    /// Marks the session busy for a crawl against `origin`
    ///
    /// Returns false if a crawl is already marked in progress.
    pub fn begin(&mut self, origin: Origin) -> bool {
        if self.phase == SessionPhase::Crawling {
            return false;
        }

        self.crawled.clear();
        self.sitemap.clear();
        self.origin = Some(origin);
        self.phase = SessionPhase::Crawling;
        true
    }

    /// Marks the crawl as complete so reports may be built
    pub fn finish(&mut self) {
        self.phase = SessionPhase::Ready;
    }

    /// The origin of the current crawl, if one was started
    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == SessionPhase::Crawling
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }
}
