//! Output module for crawl results
//!
//! This module handles:
//! - Writing discovered locations and per-task errors, one per line
//! - Recording crawl statistics and the final summary

mod sink;
pub mod stats;

pub use sink::{LineSink, SinkSender};
pub use stats::{CrawlStats, CrawlSummary};
