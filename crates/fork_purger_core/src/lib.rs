//! # Fork Purger Core
//!
//! Finds every forked repository a GitHub user owns and deletes it, or reports which
//! repositories would be deleted when running in [`RunMode::DryRun`].
//!
//! A run is a small producer/consumer pipeline:
//!
//! 1. A [`RepositoryLister`] walks the user's repositories page by page.
//! 2. [`enqueue_forks`] keeps only the forks and pushes them onto a bounded
//!    [`work_queue`], suspending whenever the queue is full.
//! 3. A [`WorkerPool`] of `concurrency` workers pops targets and deletes them,
//!    recording a [`DeletionOutcome`] for each one.
//!
//! The workers start before the listing does, so deletions overlap with the listing
//! of later pages. [`ForkPurger::run`] ties these together and returns a
//! [`RunReport`] once everything has been processed.

pub mod config;
pub use config::{PurgeConfig, DEFAULT_CONCURRENCY, DEFAULT_PAGE_SIZE, DEFAULT_QUEUE_CAPACITY};

pub mod errors;
pub use errors::Error;

pub mod filter;
pub use filter::{enqueue_forks, fork_targets, QueuedTarget};

pub mod lister;
pub use lister::RepositoryLister;

pub mod models;
pub use models::{DeleteTarget, DeletionOutcome, RunMode, RunReport};

pub mod orchestrator;
pub use orchestrator::ForkPurger;

pub mod queue;
pub use queue::{work_queue, PushError, QueueReceiver, QueueSender};

pub mod worker;
pub use worker::{ResultCollector, WorkerPool};

#[cfg(test)]
mod test_support;
