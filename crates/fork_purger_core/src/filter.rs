//! Fork filtering and the producer side of the pipeline.

use github_client::RepositoryDescriptor;
use tracing::{debug, info, instrument};

use crate::errors::Error;
use crate::lister::RepositoryLister;
use crate::models::DeleteTarget;
use crate::queue::{PushError, QueueSender};

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

/// A delete target together with the order in which it was discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedTarget {
    /// Zero-based discovery position across all listing pages
    pub position: usize,
    pub target: DeleteTarget,
}

/// Returns the delete targets for the forks in `descriptors`, in listing order.
///
/// Non-fork repositories are skipped. The function is pure, so filtering the same
/// descriptors twice yields the same targets.
pub fn fork_targets(descriptors: &[RepositoryDescriptor]) -> Vec<DeleteTarget> {
    descriptors
        .iter()
        .filter_map(DeleteTarget::from_descriptor)
        .collect()
}

/// Drains `lister` and pushes every fork onto the queue.
///
/// Pushing suspends while the queue is full, which throttles the listing to the pace
/// of the workers. The queue is closed when this function returns, whether the
/// listing completed or failed, so the workers always observe the end of the stream.
///
/// Returns the number of targets enqueued.
///
/// # Errors
///
/// Returns `Error::Listing` if a page fetch fails. Targets pushed before the failure
/// stay on the queue. Returns `Error::QueueClosed` if every receiver has been dropped.
#[instrument(skip_all)]
pub async fn enqueue_forks(
    mut lister: RepositoryLister,
    sender: QueueSender<QueuedTarget>,
) -> Result<usize, Error> {
    let mut enqueued = 0usize;

    while let Some(page) = lister.next_page().await? {
        let targets = fork_targets(&page);
        debug!(
            repositories = page.len(),
            forks = targets.len(),
            "Filtered listing page"
        );

        for target in targets {
            let queued = QueuedTarget {
                position: enqueued,
                target,
            };

            if let Err(PushError::Closed(rejected)) = sender.push(queued).await {
                return Err(Error::QueueClosed(rejected.target.api_url));
            }

            enqueued += 1;
        }
    }

    info!(enqueued = enqueued, "Finished enumerating forked repositories");
    sender.close();

    Ok(enqueued)
}
