//! Error types for a fork purge run.
//!
//! Only failures that stop the whole run live here. A repository that cannot be
//! deleted is not an error of the run; it is recorded as a failed
//! [`DeletionOutcome`](crate::DeletionOutcome) instead.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a fork purge run.
#[derive(Error, Debug)]
pub enum Error {
    /// A page of the repository listing could not be fetched or parsed.
    ///
    /// The listing is never treated as complete when this happens. Targets that were
    /// already queued are still processed by the workers before this error is returned.
    #[error("Failed to list repositories (page {page}): {source}")]
    Listing {
        page: u32,
        #[source]
        source: github_client::Error,
    },

    /// The run configuration is unusable (zero workers, zero queue capacity, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Every worker is gone, so a discovered fork could not be queued.
    #[error("Work queue closed before {0} could be queued")]
    QueueClosed(String),

    /// A worker task ended without observing the end of the queue.
    #[error("Worker task failed: {0}")]
    WorkerPanicked(String),

    /// The GitHub client could not be constructed.
    #[error("Failed to create GitHub client: {0}")]
    Client(#[from] github_client::Error),
}

impl Error {
    /// Returns true if this error means the repository listing did not complete.
    pub fn is_listing_error(&self) -> bool {
        matches!(self, Error::Listing { .. })
    }
}
