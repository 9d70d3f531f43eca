//! The consumer side of the pipeline: a fixed pool of delete workers.
//!
//! Each worker loops on [`QueueReceiver::pop`] until it sees the end-of-stream
//! sentinel. Because there are exactly `concurrency` workers and each handles one
//! target at a time, at most `concurrency` delete calls are ever in flight.

use std::sync::Arc;

use github_client::RepositoryClient;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::errors::Error;
use crate::filter::QueuedTarget;
use crate::models::{DeleteTarget, DeletionOutcome, RunMode, RunReport};
use crate::queue::QueueReceiver;

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;

/// Shared sink for everything the workers produce.
///
/// Entries are stored with their discovery position so the final report can be put
/// back into listing order regardless of which worker finished first.
#[derive(Debug, Default)]
pub struct ResultCollector {
    planned: Mutex<Vec<(usize, DeleteTarget)>>,
    outcomes: Mutex<Vec<(usize, DeletionOutcome)>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a target that a dry run would have deleted.
    pub async fn record_planned(&self, position: usize, target: DeleteTarget) {
        self.planned.lock().await.push((position, target));
    }

    /// Records the outcome of a delete attempt.
    pub async fn record_outcome(&self, position: usize, outcome: DeletionOutcome) {
        self.outcomes.lock().await.push((position, outcome));
    }

    /// Builds the report for `mode`, sorted by discovery position.
    pub async fn into_report(&self, mode: RunMode) -> RunReport {
        match mode {
            RunMode::DryRun => {
                let mut planned = std::mem::take(&mut *self.planned.lock().await);
                planned.sort_by_key(|(position, _)| *position);
                RunReport::Planned(planned.into_iter().map(|(_, t)| t).collect())
            }
            RunMode::Execute => {
                let mut outcomes = std::mem::take(&mut *self.outcomes.lock().await);
                outcomes.sort_by_key(|(position, _)| *position);
                RunReport::Deleted(outcomes.into_iter().map(|(_, o)| o).collect())
            }
        }
    }
}

/// A running set of delete workers.
///
/// Dropping the pool aborts every worker that is still running.
pub struct WorkerPool {
    workers: JoinSet<usize>,
}

impl WorkerPool {
    /// Spawns `concurrency` workers on the current Tokio runtime.
    ///
    /// All workers pull from `receiver`. In [`RunMode::DryRun`] the client is never
    /// asked to delete anything.
    pub fn spawn(
        concurrency: usize,
        receiver: QueueReceiver<QueuedTarget>,
        client: Arc<dyn RepositoryClient>,
        mode: RunMode,
        collector: Arc<ResultCollector>,
    ) -> Self {
        let mut workers = JoinSet::new();

        for worker_id in 0..concurrency {
            let receiver = receiver.clone();
            let client = Arc::clone(&client);
            let collector = Arc::clone(&collector);
            workers.spawn(run_worker(worker_id, receiver, client, mode, collector));
        }

        debug!(workers = concurrency, mode = ?mode, "Started delete workers");

        Self { workers }
    }

    /// Waits until every worker has seen the end of the queue.
    ///
    /// Returns the total number of targets the workers handled.
    ///
    /// # Errors
    ///
    /// Returns `Error::WorkerPanicked` if a worker panicked or was cancelled. The
    /// remaining workers are still awaited before returning.
    pub async fn join(mut self) -> Result<usize, Error> {
        let mut handled = 0usize;
        let mut failure = None;

        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(count) => handled += count,
                Err(join_error) => {
                    warn!(error = %join_error, "Delete worker did not finish cleanly");
                    failure.get_or_insert_with(|| Error::WorkerPanicked(join_error.to_string()));
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(handled),
        }
    }
}

#[instrument(skip(receiver, client, collector))]
async fn run_worker(
    worker_id: usize,
    receiver: QueueReceiver<QueuedTarget>,
    client: Arc<dyn RepositoryClient>,
    mode: RunMode,
    collector: Arc<ResultCollector>,
) -> usize {
    let mut handled = 0usize;

    while let Some(QueuedTarget { position, target }) = receiver.pop().await {
        handled += 1;

        if mode.is_dry_run() {
            debug!(api_url = %target.api_url, "Would delete repository");
            collector.record_planned(position, target).await;
            continue;
        }

        let outcome = match client.delete_repository(&target.api_url).await {
            Ok(()) => {
                info!(api_url = %target.api_url, "Deleted repository");
                DeletionOutcome::succeeded(target)
            }
            Err(e) => {
                warn!(
                    api_url = %target.api_url,
                    error = %e,
                    "Failed to delete repository"
                );
                DeletionOutcome::failed(target, e.to_string())
            }
        };

        collector.record_outcome(position, outcome).await;
    }

    debug!(handled = handled, "Delete worker finished");
    handled
}
