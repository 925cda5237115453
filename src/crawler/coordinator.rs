//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal loop:
//! - Fetching the root page, then each frontier URL in discovery order
//! - Extracting and canonicalizing links, registering and queueing new ones
//! - Recording each fetch result in the visited registry
//! - Handing registry snapshots to the progress persister
//!
//! The coordinator owns the registry and the frontier outright. The persister only
//! ever sees copies.

use crate::config::DEFAULT_PERSIST_INTERVAL;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{CrawlPhase, Frontier};
use crate::output::{CrawlSummary, PersistError, ProgressPersister};
use crate::state::VisitedRegistry;
use crate::url::Canonicalizer;
use crate::{CrawlError, Result};
use chrono::Utc;
use std::path::PathBuf;

/// Main crawler coordinator structure
pub struct Coordinator<F, C> {
    canonicalizer: C,
    fetcher: F,
    registry: VisitedRegistry,
    frontier: Frontier,
    phase: CrawlPhase,
    crawled: u64,
    persist_interval: u64,
    output_path: PathBuf,
}

impl<F: Fetcher, C: Canonicalizer> Coordinator<F, C> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `canonicalizer` - Maps hrefs onto the site; its root is the first page fetched
    /// * `fetcher` - Transport used for every page
    /// * `output_path` - Progress CSV, recreated on every snapshot
    pub fn new(canonicalizer: C, fetcher: F, output_path: PathBuf) -> Self {
        Self {
            canonicalizer,
            fetcher,
            registry: VisitedRegistry::new(),
            frontier: Frontier::new(),
            phase: CrawlPhase::NotStarted,
            crawled: 0,
            persist_interval: DEFAULT_PERSIST_INTERVAL,
            output_path,
        }
    }

    /// Sets the number of completed fetches between snapshots (minimum 1)
    pub fn with_persist_interval(mut self, interval: u64) -> Self {
        self.persist_interval = interval.max(1);
        self
    }

    /// Runs the main crawl loop until the frontier is exhausted
    ///
    /// Snapshots are submitted every `persist_interval` completed fetches and once more
    /// at the end; the call returns only after the persister has finished, on success
    /// and on error alike. A coordinator crawls once; a second call fails.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - Crawl finished and the final snapshot is on disk
    /// * `Err(CrawlError)` - The progress file could not be written, or the crawl already ran
    pub async fn run(&mut self) -> Result<CrawlSummary> {
        if self.phase != CrawlPhase::NotStarted {
            return Err(CrawlError::AlreadyRun);
        }

        let started_at = Utc::now();
        let persister = ProgressPersister::spawn(self.output_path.clone());

        let snapshots = match self.traverse(&persister).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                // A refused submit only means the worker stopped; its own error is the cause
                return Err(match persister.finish().await {
                    Err(cause) if matches!(e, CrawlError::Persist(PersistError::WorkerGone)) => {
                        cause.into()
                    }
                    Err(cause) => {
                        tracing::error!("Persister failed while the crawl was aborting: {}", cause);
                        e
                    }
                    Ok(_) => e,
                });
            }
        };
        let writes = persister.finish().await?;
        tracing::debug!("{} snapshots taken, {} written", snapshots, writes);

        let summary = CrawlSummary {
            base_url: self.canonicalizer.root().to_string(),
            output_path: self.output_path.clone(),
            started_at,
            finished_at: Utc::now(),
            fetch_attempts: self.crawled,
            fetched: self.registry.fetched_count() as u64,
            unreachable: self.registry.unreachable_count() as u64,
            discovered: self.registry.len() as u64,
            snapshots,
        };

        tracing::info!(
            "Crawl completed: {} pages attempted, {} responses, {} unreachable in {}ms",
            summary.fetch_attempts,
            summary.fetched,
            summary.unreachable,
            summary.duration().num_milliseconds()
        );

        Ok(summary)
    }

    /// Drives the frontier to exhaustion, returning the number of snapshots submitted
    async fn traverse(&mut self, persister: &ProgressPersister) -> Result<u64> {
        let root = self.canonicalizer.root().to_string();
        tracing::info!("Starting crawl at {}", root);

        // The root is fetched directly, but registered first so links back to it are
        // never queued
        self.registry.register_pending(&root);
        self.phase = CrawlPhase::Running;

        let mut snapshots = 0;
        let mut next = Some(root);
        while let Some(url) = next {
            self.crawl_url(&url).await?;

            tracing::debug!(
                "URLs queued: {}, URLs crawled: {}",
                self.frontier.len(),
                self.crawled
            );

            if self.crawled % self.persist_interval == 0 {
                tracing::info!(
                    "Progress: {} crawled, {} queued, {} known",
                    self.crawled,
                    self.frontier.len(),
                    self.registry.len()
                );

                persister.submit(self.registry.snapshot())?;
                snapshots += 1;
            }

            next = self.frontier.pop();
        }

        self.phase = CrawlPhase::Done;
        tracing::info!("Frontier is empty, crawl complete");

        persister.submit(self.registry.snapshot())?;
        Ok(snapshots + 1)
    }

    /// Fetches one URL, queues its new links and records the result
    ///
    /// Transport failures are logged and recorded; they never stop the crawl.
    async fn crawl_url(&mut self, url: &str) -> Result<()> {
        tracing::debug!("Fetching {}", url);

        match self.fetcher.fetch(url).await {
            Ok(page) => {
                if page.truncated {
                    tracing::warn!("Extracting links from a partial body for {}", url);
                }

                let queued = self.enqueue_links(extract_links(&page.body));
                self.registry.record_result(url, page.status_code)?;

                tracing::debug!(
                    "Fetched {} ({}), {} new URLs queued",
                    url,
                    page.status_code,
                    queued
                );
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                self.registry.record_failure(url)?;
            }
        }

        self.crawled += 1;
        Ok(())
    }

    /// Registers and queues every href that is on-site and not yet known
    fn enqueue_links(&mut self, hrefs: impl Iterator<Item = String>) -> usize {
        let mut queued = 0;

        for href in hrefs {
            let Some(url) = self.canonicalizer.canonicalize(&href) else {
                tracing::trace!("Rejected href {:?}", href);
                continue;
            };

            if self.registry.register_pending(&url) {
                self.frontier.push(url);
                queued += 1;
            }
        }

        queued
    }

    /// The visited registry
    pub fn registry(&self) -> &VisitedRegistry {
        &self.registry
    }

    /// Current phase of the traversal
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Completed fetch attempts so far
    pub fn crawled(&self) -> u64 {
        self.crawled
    }

    /// Total URLs ever pushed onto the frontier
    pub fn enqueued_total(&self) -> usize {
        self.frontier.enqueued_total()
    }
}
