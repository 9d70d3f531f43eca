//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when talking to the GitHub REST API
//! through the github_client crate. Callers decide per call site whether an error is fatal
//! (a failed listing page) or local (a single failed repository deletion).

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.delete_repository(api_url).await {
///     Ok(()) => println!("Deleted {api_url}"),
///     Err(Error::Api { status, .. }) if status == 403 => eprintln!("Token lacks delete_repo scope"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status code.
    ///
    /// The message carries the response body (or the GitHub error message) so that
    /// the caller can show why a specific request was refused.
    #[error("GitHub API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The credential was rejected or the client could not be initialised with it.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// A listing page whose elements lack the fields this crate needs (for example
    /// the `fork` flag) ends up here.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// A repository API URL could not be used as a request target.
    #[error("Invalid repository API URL: {0}")]
    InvalidUrl(String),

    /// The requested resource was not found.
    #[error("Resource not found (status 404)")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced an HTTP response (DNS, TLS, connection reset, ...).
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),
}

impl Error {
    /// Returns the HTTP status code associated with this error, if GitHub sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound => Some(404),
            _ => None,
        }
    }
}
