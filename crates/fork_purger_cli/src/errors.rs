use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the fork-purger CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing the configuration file.
    ///
    /// This error is returned when an explicitly requested file is missing, cannot
    /// be read, or does not match the expected layout.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The purge run itself failed.
    #[error(transparent)]
    Purge(#[from] fork_purger_core::Error),
}
