//! Crawl statistics
//!
//! Counters bumped by task processing while the crawl runs, and the summary
//! the coordinator assembles from them once everything has been joined.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by all workers
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Fetches that returned a page
    pub pages_fetched: AtomicU64,

    /// Pages skipped as non-HTML or not a listing
    pub pages_skipped: AtomicU64,

    /// Listing pages whose links were walked
    pub listings: AtomicU64,

    /// Child tasks handed to an idle worker
    pub handoffs: AtomicU64,

    /// Child tasks processed inline because no worker was free
    pub inline_fallbacks: AtomicU64,

    /// Values sent to the result sink
    pub results: AtomicU64,

    /// Values sent to the error sink
    pub errors: AtomicU64,
}

impl CrawlStats {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

/// Final numbers for a completed crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Seeds submitted by the coordinator
    pub seeds: u64,

    /// Tasks created, seeds included
    pub tasks: u64,

    /// Tasks finished, seeds included
    pub tasks_finished: u64,

    /// Times the outstanding count reached zero
    pub zero_transitions: u64,

    pub pages_fetched: u64,
    pub pages_skipped: u64,
    pub listings: u64,
    pub handoffs: u64,
    pub inline_fallbacks: u64,
    pub results: u64,
    pub errors: u64,
}

impl CrawlSummary {
    /// Builds a summary from the live counters
    ///
    /// `tasks` and `tasks_finished` exclude the coordinator's own seeding slot.
    pub fn collect(
        stats: &CrawlStats,
        seeds: u64,
        acquired: u64,
        finished: u64,
        zero_transitions: u64,
    ) -> Self {
        Self {
            seeds,
            tasks: acquired.saturating_sub(1),
            tasks_finished: finished.saturating_sub(1),
            zero_transitions,
            pages_fetched: CrawlStats::get(&stats.pages_fetched),
            pages_skipped: CrawlStats::get(&stats.pages_skipped),
            listings: CrawlStats::get(&stats.listings),
            handoffs: CrawlStats::get(&stats.handoffs),
            inline_fallbacks: CrawlStats::get(&stats.inline_fallbacks),
            results: CrawlStats::get(&stats.results),
            errors: CrawlStats::get(&stats.errors),
        }
    }
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seeds, {} tasks ({} listings, {} skipped), {} handed off, {} inline, {} results, {} errors",
            self.seeds,
            self.tasks,
            self.listings,
            self.pages_skipped,
            self.handoffs,
            self.inline_fallbacks,
            self.results,
            self.errors
        )
    }
}
