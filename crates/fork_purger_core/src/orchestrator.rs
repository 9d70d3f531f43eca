//! Wires the lister, the queue and the worker pool into a single run.

use std::sync::Arc;

use github_client::{create_token_client, GitHubClient, RepositoryClient};
use tracing::{error, info, instrument};

use crate::config::PurgeConfig;
use crate::errors::Error;
use crate::filter::enqueue_forks;
use crate::lister::RepositoryLister;
use crate::models::{RunMode, RunReport};
use crate::queue::work_queue;
use crate::worker::{ResultCollector, WorkerPool};

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

/// Finds every fork a user owns and deletes it, or reports what would be deleted.
///
/// ```no_run
/// # async fn example() -> Result<(), fork_purger_core::Error> {
/// use fork_purger_core::{ForkPurger, PurgeConfig, RunMode};
///
/// let purger = ForkPurger::with_token("ghp_example", None, PurgeConfig::default())?;
/// let report = purger.run("alice", RunMode::DryRun).await?;
/// for url in report.api_urls() {
///     println!("{url}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ForkPurger {
    client: Arc<dyn RepositoryClient>,
    config: PurgeConfig,
}

impl ForkPurger {
    /// Creates a purger that talks to GitHub through `client`.
    pub fn new(client: Arc<dyn RepositoryClient>, config: PurgeConfig) -> Self {
        Self { client, config }
    }

    /// Creates a purger authenticated with a personal access token.
    ///
    /// `base_uri` overrides the GitHub API endpoint, e.g. for GitHub Enterprise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Client` if the underlying HTTP client cannot be built.
    pub fn with_token(
        token: &str,
        base_uri: Option<&str>,
        config: PurgeConfig,
    ) -> Result<Self, Error> {
        let octocrab = create_token_client(token, base_uri)?;
        Ok(Self::new(Arc::new(GitHubClient::new(octocrab)), config))
    }

    /// Runs the purge for `username`.
    ///
    /// The workers are started before the first page is requested, so deletions
    /// proceed while later pages are still being listed. The call returns once every
    /// queued target has been handled.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidConfiguration` if the configuration fails validation; nothing
    ///   is listed or deleted.
    /// * `Error::Listing` if a page could not be fetched. Targets found before the
    ///   failure have still been processed.
    /// * `Error::WorkerPanicked` if a worker did not finish cleanly.
    #[instrument(skip(self), fields(concurrency = self.config.concurrency))]
    pub async fn run(&self, username: &str, mode: RunMode) -> Result<RunReport, Error> {
        self.config.validate()?;

        info!(
            username = username,
            mode = ?mode,
            "Starting fork purge"
        );

        let (sender, receiver) = work_queue(self.config.queue_capacity);
        let collector = Arc::new(ResultCollector::new());
        let pool = WorkerPool::spawn(
            self.config.concurrency,
            receiver,
            Arc::clone(&self.client),
            mode,
            Arc::clone(&collector),
        );

        let lister = RepositoryLister::new(
            Arc::clone(&self.client),
            username,
            self.config.page_size,
        );
        let listing = enqueue_forks(lister, sender).await;

        // The queue is closed by now, so the workers drain it and stop.
        let joined = pool.join().await;

        let enqueued = match listing {
            Ok(enqueued) => enqueued,
            Err(e) => {
                error!(username = username, error = %e, "Fork purge aborted");
                return Err(e);
            }
        };
        joined?;

        let report = collector.into_report(mode).await;
        info!(
            username = username,
            forks = enqueued,
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "Fork purge complete"
        );

        Ok(report)
    }
}
