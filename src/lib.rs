//! Index-Ripple: a directory listing crawler
//!
//! This crate walks "Index of" pages served by static file servers, starting from
//! one or more seed URLs, and reports every file (and optionally directory) it
//! finds while recursing into subdirectories with a bounded pool of workers.

pub mod config;
pub mod crawler;
pub mod link;
pub mod output;

use thiserror::Error;

/// Main error type for Index-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("Output sink failed: {0}")]
    Sink(String),
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
}

/// Failure to retrieve a page
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),
}

/// Failure to turn a fetched body into a document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// A per-task failure, as reported on the error sink
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("parse {url}: {source}")]
    Parse { url: String, source: ParseError },
}

impl CrawlError {
    /// The URL of the task that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}

/// Result type alias for Index-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, Coordinator, CrawlSummary};
pub use link::{passes_filter, LinkKind};
