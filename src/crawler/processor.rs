//! Task processing
//!
//! Runs one task from fetch to its last link:
//! 1. Fetch the page (failure → error sink)
//! 2. Skip silently unless the Content-Type is HTML
//! 3. Parse the body (failure → error sink)
//! 4. Skip silently unless the title marks a directory listing
//! 5. Walk the hrefs in document order, spawning a child task for every
//!    directory and reporting what passes the filter
//!
//! A child that cannot be handed to an idle worker is processed by the same
//! worker before it moves on to the parent's remaining links. Instead of
//! recursing, the worker keeps a stack of open listings: the child's listing
//! is pushed on top of its parent and walked first. Native stack depth stays
//! flat however deep the site goes; the heap stack grows by one frame per
//! level of such inline descent and has no cap.
//!
//! A task's slot lives in its frame, or dies in `open` when the task stops
//! early, so every task is finished exactly once whichever way it ends.

use crate::crawler::counter::{OutstandingCounter, TaskSlot};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::{FrontierSender, Task};
use crate::crawler::parser::Extractor;
use crate::link::{child_url, passes_filter, LinkKind};
use crate::output::{CrawlStats, SinkSender};
use crate::CrawlError;
use std::sync::Arc;

/// A listing page whose links are still being walked
struct Frame {
    url: String,
    hrefs: std::vec::IntoIter<String>,
    _slot: TaskSlot,
}

/// Everything a worker needs to process tasks
pub struct TaskProcessor {
    pub(crate) fetcher: Arc<dyn Fetcher>,
    pub(crate) extractor: Arc<dyn Extractor>,
    pub(crate) counter: Arc<OutstandingCounter>,
    pub(crate) frontier: FrontierSender,
    pub(crate) results: SinkSender<String>,
    pub(crate) errors: SinkSender<CrawlError>,
    pub(crate) stats: Arc<CrawlStats>,
    pub(crate) files_only: bool,
}

impl TaskProcessor {
    /// Processes a task and every child that falls back to this worker
    pub async fn process(&self, task: Task) {
        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.open(task).await {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(href) = frame.hrefs.next() else {
                // Listing exhausted: releasing the frame finishes its task.
                stack.pop();
                continue;
            };

            if let Some(child) = self.visit(&frame.url, &href) {
                CrawlStats::bump(&self.stats.inline_fallbacks);
                tracing::trace!("No idle worker, descending inline into {}", child.url());
                if let Some(child_frame) = self.open(child).await {
                    stack.push(child_frame);
                }
            }
        }
    }

    /// Fetches and parses a task's page
    ///
    /// Returns the listing to walk, or `None` when the task ended here (its
    /// slot is released on return).
    async fn open(&self, task: Task) -> Option<Frame> {
        let (url, slot) = task.into_parts();
        tracing::debug!("Processing URL: {}", url);

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(source) => {
                self.report(CrawlError::Fetch { url, source });
                return None;
            }
        };
        CrawlStats::bump(&self.stats.pages_fetched);

        if !page.is_html() {
            tracing::trace!("Skipping {}: content type {:?}", url, page.content_type);
            CrawlStats::bump(&self.stats.pages_skipped);
            return None;
        }

        let listing = match self.extractor.extract(&page.body) {
            Ok(listing) => listing,
            Err(source) => {
                self.report(CrawlError::Parse { url, source });
                return None;
            }
        };

        if !listing.is_directory_listing() {
            tracing::trace!("Skipping {}: not a directory listing", url);
            CrawlStats::bump(&self.stats.pages_skipped);
            return None;
        }

        CrawlStats::bump(&self.stats.listings);
        tracing::debug!("Listing {} has {} links", url, listing.hrefs.len());

        Some(Frame {
            url,
            hrefs: listing.hrefs.into_iter(),
            _slot: slot,
        })
    }

    /// Handles one href of a listing
    ///
    /// Returns the child task when it must be processed inline.
    fn visit(&self, parent: &str, href: &str) -> Option<Task> {
        if !passes_filter(href) {
            return None;
        }

        let kind = LinkKind::of(href);
        let location = child_url(parent, href);

        let mut inline = None;
        if kind.is_directory() {
            // Counted before the handoff so the count never trails live work.
            let child = Task::new(location.clone(), self.counter.acquire());
            match self.frontier.try_hand_off(child) {
                Ok(()) => {
                    CrawlStats::bump(&self.stats.handoffs);
                    tracing::trace!("Handed off {}", location);
                }
                Err(child) => inline = Some(child),
            }
        }

        if !(self.files_only && kind.is_directory()) {
            self.emit(location);
        }

        inline
    }

    fn emit(&self, location: String) {
        CrawlStats::bump(&self.stats.results);
        if self.results.send(location).is_err() {
            tracing::trace!("Result sink is gone, dropping result");
        }
    }

    fn report(&self, error: CrawlError) {
        tracing::debug!("Task failed: {}", error);
        CrawlStats::bump(&self.stats.errors);
        if self.errors.send(error).is_err() {
            tracing::trace!("Error sink is gone, dropping error");
        }
    }
}
