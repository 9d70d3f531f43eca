//! Run configuration for the purge pipeline.
//!
//! The values here are fixed for the duration of a run and are passed explicitly
//! into the [`ForkPurger`](crate::ForkPurger). They deserialize from the `[purge]`
//! section of the CLI configuration file, with every field optional.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default number of concurrent delete workers.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default capacity of the bounded work queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default number of repositories requested per listing page.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Tunables of a purge run.
///
/// # Example TOML Configuration
///
/// ```toml
/// [purge]
/// concurrency = 8
/// queue_capacity = 50
/// page_size = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeConfig {
    /// Number of workers, i.e. the maximum number of delete calls in flight.
    #[serde(default = "PurgeConfig::default_concurrency")]
    pub concurrency: usize,

    /// Capacity of the queue between the listing and the workers.
    #[serde(default = "PurgeConfig::default_queue_capacity")]
    pub queue_capacity: usize,

    /// Repositories requested per listing page (GitHub caps this at 100).
    #[serde(default = "PurgeConfig::default_page_size")]
    pub page_size: u8,
}

impl PurgeConfig {
    fn default_concurrency() -> usize {
        DEFAULT_CONCURRENCY
    }

    fn default_queue_capacity() -> usize {
        DEFAULT_QUEUE_CAPACITY
    }

    fn default_page_size() -> u8 {
        DEFAULT_PAGE_SIZE
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if any value is zero or the page size
    /// exceeds what GitHub accepts.
    pub fn validate(&self) -> Result<(), Error> {
        if self.concurrency == 0 {
            return Err(Error::InvalidConfiguration(
                "concurrency must be at least 1".to_string(),
            ));
        }

        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "queue_capacity must be at least 1".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > github_client::MAX_PAGE_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "page_size must be between 1 and {}",
                github_client::MAX_PAGE_SIZE
            )));
        }

        Ok(())
    }
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
