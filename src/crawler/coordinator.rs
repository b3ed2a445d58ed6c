//! Crawler coordinator - wiring, seeding and shutdown
//!
//! The coordinator owns every moving part of a crawl:
//! - Spawning the result and error sinks
//! - Spawning the worker pool into a join set
//! - Submitting seeds with blocking sends
//! - Joining the pool, then closing and joining the sinks
//!
//! Termination is never polled for. The frontier closes itself when the
//! outstanding count drops to zero, which ends the workers, which drops the
//! last sink senders. The coordinator holds one slot of its own for as long as
//! it is seeding: without it a fast first seed could bring the count to zero
//! while later seeds are still unread, and an empty seed list would never
//! close the frontier at all.

use crate::config::{validate, CrawlConfig};
use crate::crawler::counter::OutstandingCounter;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::frontier::{frontier, Task};
use crate::crawler::parser::{Extractor, HtmlExtractor};
use crate::crawler::processor::TaskProcessor;
use crate::crawler::seeds::SeedSource;
use crate::crawler::worker::spawn_pool;
use crate::output::{CrawlStats, CrawlSummary, LineSink};
use crate::RippleError;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWrite;

/// What a finished crawl hands back
#[derive(Debug)]
pub struct CrawlOutcome<O, E> {
    /// Counters for the whole run
    pub summary: CrawlSummary,
    /// The result writer, after its last flush
    pub results: O,
    /// The error writer, after its last flush
    pub errors: E,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
}

impl Coordinator {
    /// Creates a coordinator fetching over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(RippleError)` - Invalid configuration, or the HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, RippleError> {
        let fetcher = HttpFetcher::new()?;
        Self::with_components(config, Arc::new(fetcher), Arc::new(HtmlExtractor::new()))
    }

    /// Creates a coordinator around custom fetch and parse collaborators
    pub fn with_components(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
    ) -> Result<Self, RippleError> {
        validate(&config)?;
        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }

    /// Runs a crawl to quiescence
    ///
    /// Results are written to `results` and per-task failures to `errors`,
    /// one per line. Returns once every task has finished and both writers
    /// have been flushed.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Crawl completed; per-task failures are in the error output
    /// * `Err(RippleError)` - Reading seeds, a worker, or a sink failed
    pub async fn run<O, E>(
        &self,
        mut seeds: SeedSource,
        results: O,
        errors: E,
    ) -> Result<CrawlOutcome<O, E>, RippleError>
    where
        O: AsyncWrite + Unpin + Send + 'static,
        E: AsyncWrite + Unpin + Send + 'static,
    {
        let start_time = Instant::now();

        let (frontier_tx, frontier_rx) = frontier();
        let closer = frontier_tx.clone();
        let counter = OutstandingCounter::new(move || closer.close());

        let (results_tx, results_sink) = LineSink::spawn::<String>("results", results);
        let (errors_tx, errors_sink) = LineSink::spawn("errors", errors);
        let stats = Arc::new(CrawlStats::default());

        let processor = Arc::new(TaskProcessor {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            counter: Arc::clone(&counter),
            frontier: frontier_tx.clone(),
            results: results_tx,
            errors: errors_tx,
            stats: Arc::clone(&stats),
            files_only: self.config.files_only,
        });

        tracing::info!(
            "Starting crawl with {} workers (files only: {})",
            self.config.concurrency,
            self.config.files_only
        );
        let mut workers = spawn_pool(self.config.concurrency, frontier_rx, processor);

        // Seeding phase
        let seeding = counter.acquire();
        let mut seed_count = 0u64;
        let mut seed_error = None;
        loop {
            let seed = match seeds.next_seed().await {
                Ok(Some(seed)) => seed,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read seeds: {}", e);
                    seed_error = Some(e);
                    break;
                }
            };

            tracing::debug!("Seeding {}", seed);
            let task = Task::new(seed, counter.acquire());
            if !frontier_tx.submit(task).await {
                tracing::warn!("Frontier closed while seeding");
                break;
            }
            seed_count += 1;
        }
        drop(frontier_tx);
        drop(seeding);
        tracing::debug!("Submitted {} seeds", seed_count);

        // Pool shutdown: workers exit once the frontier has closed.
        let mut worker_failure = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker failed: {}", e);
                worker_failure.get_or_insert_with(|| e.to_string());
            }
        }
        debug_assert_eq!(counter.outstanding(), 0);

        // The workers held the last processor handles, and with them the
        // last sink senders.
        let results = results_sink.finish().await?;
        let errors = errors_sink.finish().await?;

        let summary = CrawlSummary::collect(
            &stats,
            seed_count,
            counter.acquired(),
            counter.finished(),
            counter.zero_transitions(),
        );
        tracing::info!(
            "Crawl completed in {:?}: {}",
            start_time.elapsed(),
            summary
        );

        if let Some(e) = seed_error {
            return Err(e.into());
        }
        if let Some(e) = worker_failure {
            return Err(RippleError::Worker(e));
        }

        Ok(CrawlOutcome {
            summary,
            results,
            errors,
        })
    }
}
