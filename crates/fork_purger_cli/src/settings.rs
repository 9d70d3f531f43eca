//! Merges command line arguments with the configuration file and maps run results
//! onto process exit codes.

use fork_purger_core::{ForkPurger, PurgeConfig, RunMode, RunReport};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::args::Cli;
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// The run completed and every delete succeeded (or nothing needed deleting).
pub const EXIT_SUCCESS: i32 = 0;

/// The run completed but at least one fork could not be deleted.
pub const EXIT_DELETE_FAILURES: i32 = 1;

/// The run could not complete: bad configuration, client or listing failure.
pub const EXIT_ERROR: i32 = 2;

/// Everything needed to perform a run.
pub struct Settings {
    pub username: String,
    pub token: SecretString,
    pub mode: RunMode,
    pub api_url: Option<String>,
    pub purge: PurgeConfig,
}

impl Settings {
    /// Combines `cli` with `file`. Command line values win over file values, which
    /// win over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArguments` if the username or token is blank.
    pub fn resolve(cli: Cli, file: AppConfig) -> Result<Self, Error> {
        if cli.username.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "--username must not be empty".to_string(),
            ));
        }

        if cli.token.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "--token must not be empty".to_string(),
            ));
        }

        let mut purge = file.purge;
        if let Some(concurrency) = cli.concurrency {
            purge.concurrency = concurrency;
        }
        if let Some(queue_capacity) = cli.queue_capacity {
            purge.queue_capacity = queue_capacity;
        }
        if let Some(page_size) = cli.page_size {
            purge.page_size = page_size;
        }

        Ok(Self {
            username: cli.username,
            token: SecretString::from(cli.token),
            mode: RunMode::from_delete_flag(cli.delete),
            api_url: cli.api_url.or(file.api_url),
            purge,
        })
    }

    /// Loads the configuration file named by `cli` (or the default one) and resolves
    /// the settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration file can't be loaded and
    /// `Error::InvalidArguments` for blank credentials.
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        let file = AppConfig::load_for(cli.config.as_deref())?;
        Self::resolve(cli, file)
    }
}

/// Performs the run described by `settings`.
///
/// # Errors
///
/// Returns `Error::Purge` if the client can't be built, the configuration is
/// invalid, or the listing fails.
#[instrument(skip(settings), fields(username = %settings.username, mode = ?settings.mode))]
pub async fn execute(settings: &Settings) -> Result<RunReport, Error> {
    debug!(config = ?settings.purge, api_url = ?settings.api_url, "Resolved run settings");

    let purger = ForkPurger::with_token(
        settings.token.expose_secret(),
        settings.api_url.as_deref(),
        settings.purge.clone(),
    )?;

    Ok(purger.run(&settings.username, settings.mode).await?)
}

/// Maps the result of a run onto the process exit code.
pub fn exit_code(result: &Result<RunReport, Error>) -> i32 {
    match result {
        Ok(report) if report.failed_count() > 0 => EXIT_DELETE_FAILURES,
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_ERROR,
    }
}
