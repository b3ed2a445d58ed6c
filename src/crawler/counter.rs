//! Outstanding work counter
//!
//! Tracks how many tasks exist (created but not yet finished) across the whole
//! crawl. A slot is acquired before a task is handed to anyone and released
//! exactly once when the task is done; the release that brings the count back
//! to zero fires the close hook, which shuts the frontier.
//!
//! A child task is only ever created while its parent still holds a slot, so
//! the count cannot touch zero while anything capable of producing more work
//! is alive.

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

type CloseHook = Box<dyn Fn() + Send + Sync>;

/// Atomic count of live tasks with a hook for the transition to zero
pub struct OutstandingCounter {
    count: AtomicI64,
    acquired: AtomicU64,
    finished: AtomicU64,
    zero_transitions: AtomicU64,
    on_zero: CloseHook,
}

impl OutstandingCounter {
    /// Creates a counter that calls `on_zero` when the last slot is released
    pub fn new(on_zero: impl Fn() + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            count: AtomicI64::new(0),
            acquired: AtomicU64::new(0),
            finished: AtomicU64::new(0),
            zero_transitions: AtomicU64::new(0),
            on_zero: Box::new(on_zero),
        })
    }

    /// Counts one new task and returns the slot that represents it
    ///
    /// The increment is complete before this returns, so it happens-before
    /// whatever the caller does with the slot.
    pub fn acquire(self: &Arc<Self>) -> TaskSlot {
        self.count.fetch_add(1, Ordering::AcqRel);
        self.acquired.fetch_add(1, Ordering::Relaxed);
        TaskSlot {
            counter: Arc::clone(self),
        }
    }

    /// Number of tasks currently alive
    pub fn outstanding(&self) -> i64 {
        self.count.load(Ordering::Acquire)
    }

    /// Total slots ever acquired
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Total slots ever released
    pub fn finished(&self) -> u64 {
        self.finished.load(Ordering::Relaxed)
    }

    /// Number of times the count dropped to zero
    pub fn zero_transitions(&self) -> u64 {
        self.zero_transitions.load(Ordering::Relaxed)
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::Relaxed);
        let previous = self.count.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "outstanding count went negative");

        // Only one caller can observe the 1 -> 0 transition.
        if previous == 1 {
            self.zero_transitions.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("outstanding count reached zero, closing frontier");
            (self.on_zero)();
        }
    }
}

impl fmt::Debug for OutstandingCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutstandingCounter")
            .field("outstanding", &self.outstanding())
            .field("acquired", &self.acquired())
            .field("finished", &self.finished())
            .finish()
    }
}

/// One counted unit of work
///
/// Dropping the slot is the task's `finish()`. It cannot be cloned, so every
/// slot is released exactly once on whatever path its owner leaves by,
/// including unwinding.
#[must_use = "dropping a slot finishes its task immediately"]
pub struct TaskSlot {
    counter: Arc<OutstandingCounter>,
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.counter.finish();
    }
}

impl fmt::Debug for TaskSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskSlot")
    }
}
