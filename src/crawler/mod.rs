//! Crawler module for directory listing traversal
//!
//! This module contains the core crawling logic, including:
//! - The outstanding work counter that detects termination
//! - The zero-capacity frontier between producers and workers
//! - HTTP fetching and listing extraction
//! - Per-task processing with inline fallback
//! - The worker pool and overall crawl coordination

mod coordinator;
mod counter;
mod fetcher;
mod frontier;
mod parser;
mod processor;
mod seeds;
mod worker;

#[cfg(test)]
mod test_support;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use counter::{OutstandingCounter, TaskSlot};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{frontier, FrontierReceiver, FrontierSender, Task};
pub use parser::{Extractor, HtmlExtractor, ParsedListing, LISTING_TITLE_MARKER};
pub use processor::TaskProcessor;
pub use seeds::SeedSource;

pub use crate::output::CrawlSummary;

use crate::config::CrawlConfig;
use crate::RippleError;

/// Runs a complete crawl over HTTP
///
/// Results go to stdout and per-task failures to stderr, one per line.
///
/// # Arguments
///
/// * `config` - Pool size and files-only mode
/// * `seeds` - Where the initial URLs come from
///
/// # Example
///
/// ```no_run
/// use index_ripple::config::CrawlConfig;
/// use index_ripple::crawler::{crawl, SeedSource};
///
/// # async fn example() -> Result<(), index_ripple::RippleError> {
/// let seeds = SeedSource::from_args(vec!["http://mirror.example.org/pub/".to_string()]);
/// let summary = crawl(CrawlConfig::default(), seeds).await?;
/// println!("{} files and directories found", summary.results);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: CrawlConfig, seeds: SeedSource) -> Result<CrawlSummary, RippleError> {
    let coordinator = Coordinator::new(config)?;
    let outcome = coordinator
        .run(seeds, tokio::io::stdout(), tokio::io::stderr())
        .await?;
    Ok(outcome.summary)
}
