//! Audit orchestration
//!
//! The [`Auditor`] owns the HTTP client and the single crawl session. It runs
//! the crawl engine and the sitemap resolver against one origin, then serves
//! report views over the two resulting page sets.

use crate::config::Config;
use crate::crawler::engine::crawl_pages;
use crate::crawler::fetcher::{build_http_client, probe_page};
use crate::output::{combined_timing, difference, AuditReport, CrawlStats};
use crate::sitemap::resolve_sitemap;
use crate::state::{CrawlSession, WebPage};
use crate::url::{parse_root_url, Origin};
use crate::AuditError;
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;

/// Crawls one site at a time and reports on it
pub struct Auditor {
    client: Client,
    session: CrawlSession,
}

impl Auditor {
    /// Creates an auditor with an HTTP client built from `config`
    pub fn new(config: &Config) -> Result<Self, AuditError> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates an auditor around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            session: CrawlSession::new(),
        }
    }

    /// Crawls the site at `root_url` and resolves its sitemap
    ///
    /// Any previous session state is discarded first. On failure the session
    /// is reset, so reports stay unavailable until a crawl succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Crawl and sitemap resolution completed; reports are ready
    /// * `Err(AuditError::InvalidInput)` - `root_url` is not an absolute http(s) URL
    /// * `Err(AuditError::UnsupportedTransport)` - A request failed below HTTP
    /// * `Err(AuditError::Busy)` - A previous crawl was interrupted without a reset
    pub async fn crawl_site(&mut self, root_url: &str) -> Result<(), AuditError> {
        if self.session.is_busy() {
            return Err(AuditError::Busy);
        }
        self.session.reset();

        let (origin, seed) = parse_root_url(root_url)?;
        tracing::info!("Auditing {} (origin {})", seed, origin);

        self.session.begin(origin.clone());
        match self.run(&origin, &seed).await {
            Ok(()) => {
                self.session.finish();
                tracing::info!(
                    "Audit of {} ready: {} crawled, {} in sitemap",
                    origin,
                    self.session.crawled.len(),
                    self.session.sitemap.len()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Audit of {} failed: {}", origin, e);
                self.session.reset();
                Err(e)
            }
        }
    }

    async fn run(&mut self, origin: &Origin, seed: &str) -> Result<(), AuditError> {
        crawl_pages(&self.client, origin, seed, &mut self.session.crawled).await?;
        resolve_sitemap(&self.client, origin, &mut self.session.sitemap).await
    }

    /// Crawled pages the sitemap does not list, sorted by URL
    pub fn crawled_not_in_sitemap(&self) -> Result<Vec<WebPage>, AuditError> {
        self.ensure_ready()?;
        Ok(difference(&self.session.crawled, &self.session.sitemap))
    }

    /// Sitemap pages the crawl did not reach, sorted by URL
    pub fn sitemap_not_crawled(&self) -> Result<Vec<WebPage>, AuditError> {
        self.ensure_ready()?;
        Ok(difference(&self.session.sitemap, &self.session.crawled))
    }

    /// Every known page with a measurement, ordered for the timing report
    ///
    /// Sitemap pages the crawl never reached are fetched once more to measure
    /// them; the new measurement is stored on the sitemap entry. A successful
    /// non-HTML response leaves the entry unmeasured.
    pub async fn combined_timing_report(&mut self) -> Result<Vec<WebPage>, AuditError> {
        self.ensure_ready()?;

        let unmeasured = difference(&self.session.sitemap, &self.session.crawled);
        tracing::info!("Measuring {} sitemap-only pages", unmeasured.len());

        for page in unmeasured {
            let result = probe_page(&self.client, page.url()).await?;
            if let Some(measurement) = result.probe_measurement() {
                if let Some(mut stored) = self.session.sitemap.take(page.url()) {
                    stored.measurement = measurement;
                    self.session.sitemap.insert(stored);
                }
            }
        }

        let sitemap_only: HashSet<WebPage> = self
            .session
            .sitemap
            .difference(&self.session.crawled)
            .cloned()
            .collect();

        Ok(combined_timing(&self.session.crawled, &sitemap_only))
    }

    /// Sizes of the crawled and sitemap sets
    pub fn stats(&self) -> Result<CrawlStats, AuditError> {
        self.ensure_ready()?;
        Ok(CrawlStats {
            crawled_count: self.session.crawled.len(),
            sitemap_count: self.session.sitemap.len(),
        })
    }

    /// Assembles every view of the completed crawl into one report
    pub async fn audit_report(
        &mut self,
        root_url: &str,
        config_hash: Option<String>,
    ) -> Result<AuditReport, AuditError> {
        let crawled_not_in_sitemap = self.crawled_not_in_sitemap()?;
        let sitemap_not_crawled = self.sitemap_not_crawled()?;
        let timings = self.combined_timing_report().await?;
        let stats = self.stats()?;
        let origin = self
            .origin()
            .map(|origin| origin.prefix().to_string())
            .unwrap_or_default();

        Ok(AuditReport {
            root_url: root_url.trim().to_string(),
            origin,
            generated_at: Utc::now(),
            config_hash,
            crawled_not_in_sitemap,
            sitemap_not_crawled,
            timings,
            stats,
        })
    }

    /// Discards all session state; safe at any time
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Whether reports can be built
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    /// Origin of the current session
    pub fn origin(&self) -> Option<&Origin> {
        self.session.origin()
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    fn ensure_ready(&self) -> Result<(), AuditError> {
        if self.session.is_ready() {
            Ok(())
        } else {
            Err(AuditError::NotReady)
        }
    }
}
