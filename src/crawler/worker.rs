//! Worker pool
//!
//! Each worker parks on the frontier, processes whatever it is handed, and goes
//! back for more until the frontier closes. Workers share nothing but the
//! processor; all coordination goes through the counter and the frontier.

use crate::crawler::frontier::FrontierReceiver;
use crate::crawler::processor::TaskProcessor;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Runs one worker until the frontier closes
///
/// Returns the number of tasks taken from the frontier (inline children are
/// not included).
pub async fn run_worker(id: usize, frontier: FrontierReceiver, processor: Arc<TaskProcessor>) -> u64 {
    tracing::trace!("Worker {} started", id);

    let mut received = 0;
    while let Some(task) = frontier.recv().await {
        received += 1;
        processor.process(task).await;
    }

    tracing::debug!("Worker {} exiting after {} tasks", id, received);
    received
}

/// Spawns `size` workers into a join set owned by the caller
pub fn spawn_pool(
    size: usize,
    frontier: FrontierReceiver,
    processor: Arc<TaskProcessor>,
) -> JoinSet<u64> {
    let mut workers = JoinSet::new();
    for id in 0..size {
        workers.spawn(run_worker(id, frontier.clone(), Arc::clone(&processor)));
    }
    workers
}
