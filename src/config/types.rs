use serde::Deserialize;

/// Number of workers used when nothing else is configured
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Crawl behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// Number of workers fetching pages in parallel
    pub concurrency: usize,

    /// Only report files; directories are still traversed
    #[serde(rename = "files-only")]
    pub files_only: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            files_only: false,
        }
    }
}

impl CrawlConfig {
    /// Applies command-line overrides on top of this configuration
    ///
    /// `files_only` can only be switched on from the command line, matching a
    /// boolean flag that has no negated form.
    pub fn with_overrides(mut self, concurrency: Option<usize>, files_only: bool) -> Self {
        if let Some(concurrency) = concurrency {
            self.concurrency = concurrency;
        }
        self.files_only |= files_only;
        self
    }
}
