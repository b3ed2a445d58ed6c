//! Frontier queue
//!
//! A zero-capacity channel between task producers and the worker pool: a send
//! only lands when a worker is already parked in `recv`. Producers inside the
//! pool use `try_hand_off` and take the task back when nobody is waiting; only
//! seeding uses the blocking `submit`.

use crate::crawler::counter::TaskSlot;
use kanal::{AsyncReceiver, AsyncSender};

/// A single URL to crawl, together with the slot that counts it
#[derive(Debug)]
pub struct Task {
    url: String,
    slot: TaskSlot,
}

impl Task {
    /// Creates a task from an already acquired slot
    pub fn new(url: String, slot: TaskSlot) -> Self {
        Self { url, slot }
    }

    /// The location this task crawls
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Splits the task into its URL and slot
    pub fn into_parts(self) -> (String, TaskSlot) {
        (self.url, self.slot)
    }
}

/// Creates a connected frontier sender/receiver pair
pub fn frontier() -> (FrontierSender, FrontierReceiver) {
    let (tx, rx) = kanal::bounded_async(0);
    (FrontierSender { tx }, FrontierReceiver { rx })
}

/// Producer side of the frontier
#[derive(Clone)]
pub struct FrontierSender {
    tx: AsyncSender<Task>,
}

impl FrontierSender {
    /// Hands the task to an idle worker without waiting
    ///
    /// Returns the task back when no worker is ready to take it, or when the
    /// frontier is already closed. The caller still owns its slot either way.
    pub fn try_hand_off(&self, task: Task) -> Result<(), Task> {
        let mut pending = Some(task);
        match self.tx.try_send_option(&mut pending) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => match pending.take() {
                Some(task) => Err(task),
                None => Ok(()),
            },
        }
    }

    /// Waits until a worker takes the task
    ///
    /// Only seeding waits here. If the frontier is closed the task is dropped,
    /// which releases its slot.
    pub async fn submit(&self, task: Task) -> bool {
        self.tx.send(task).await.is_ok()
    }

    /// Closes the frontier for every sender and receiver
    ///
    /// Parked workers wake up and exit. Closing twice is a no-op.
    pub fn close(&self) {
        if self.tx.close().is_err() {
            tracing::trace!("frontier already closed");
        }
    }

    /// Returns true once the frontier has been closed
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of the frontier
#[derive(Clone)]
pub struct FrontierReceiver {
    rx: AsyncReceiver<Task>,
}

impl FrontierReceiver {
    /// Waits for the next task; `None` once the frontier is closed
    pub async fn recv(&self) -> Option<Task> {
        self.rx.recv().await.ok()
    }
}
