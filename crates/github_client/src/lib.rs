//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides the two calls the fork purger needs from GitHub: listing the
//! repositories a user owns, one page at a time, and deleting a repository by its API
//! URL. Both sit behind the [`RepositoryClient`] trait so the purge pipeline can be
//! driven by any implementation, including in-memory stubs in tests.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::RepositoryDescriptor;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The largest page size the GitHub listing endpoints accept.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Trait for the repository operations used by the fork purger.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches one page of the repositories owned by `username`.
    ///
    /// Pages are numbered from 1. An empty vector means there are no further pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed, GitHub answers with a
    /// non-success status, or the page cannot be deserialized.
    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositoryDescriptor>, Error>;

    /// Deletes the repository addressed by its REST API URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if `api_url` is not an absolute http(s) URL, and an
    /// API or transport error if GitHub does not confirm the deletion with a 2xx status.
    async fn delete_repository(&self, api_url: &str) -> Result<(), Error>;
}

/// A client for interacting with the GitHub API, authenticated with a personal access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct ListRepositoriesParams {
    page: u32,
    per_page: u8,
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(username = %username, page = page))]
    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositoryDescriptor>, Error> {
        let path = format!("/users/{}/repos", username);
        let params = ListRepositoriesParams {
            page,
            per_page: per_page.min(MAX_PAGE_SIZE),
        };

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<serde_json::Value> =
            self.client.get(path, Some(&params)).await;

        let body = response.map_err(|e| map_octocrab_error("Failed to list repositories", e))?;
        let repositories: Vec<RepositoryDescriptor> = serde_json::from_value(body)?;

        debug!(
            username = username,
            page = page,
            count = repositories.len(),
            "Retrieved {} repositories on page {}",
            repositories.len(),
            page
        );

        Ok(repositories)
    }

    #[instrument(skip(self), fields(api_url = %api_url))]
    async fn delete_repository(&self, api_url: &str) -> Result<(), Error> {
        let url = parse_api_url(api_url)?;

        let response = self
            .client
            ._delete(url.as_str(), None::<&()>)
            .await
            .map_err(|e| map_octocrab_error("Failed to delete repository", e))?;

        let status = response.status();
        if status.is_success() {
            debug!(api_url = api_url, status = status.as_u16(), "Repository delete confirmed");
            return Ok(());
        }

        let body = self.client.body_to_string(response).await.unwrap_or_default();
        let message = message_from_body(&body);
        warn!(
            api_url = api_url,
            status = status.as_u16(),
            error_message = %message,
            "GitHub refused to delete repository"
        );

        Err(error_for_status(status, message))
    }
}

/// Creates an `Octocrab` client that authenticates with a personal access token.
///
/// Requests are never retried: a failed `DELETE` is reported once and left alone.
///
/// `base_uri` overrides the default `https://api.github.com`, which is needed for
/// GitHub Enterprise Server installations and for tests running against a mock server.
///
/// # Errors
///
/// Returns `Error::InvalidUrl` if `base_uri` cannot be parsed and `Error::AuthError`
/// if the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, Error};
///
/// fn main() -> Result<(), Error> {
///     let octocrab = create_token_client("ghp_example", None)?;
///     let client = GitHubClient::new(octocrab);
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .personal_token(token.to_string());

    if let Some(uri) = base_uri {
        builder = builder
            .base_uri(uri)
            .map_err(|_| Error::InvalidUrl(uri.to_string()))?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with personal token");
        Error::AuthError("Failed to build a GitHub client for the token.".to_string())
    })
}

fn parse_api_url(api_url: &str) -> Result<Url, Error> {
    let url = Url::parse(api_url).map_err(|_| Error::InvalidUrl(api_url.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(Error::InvalidUrl(api_url.to_string())),
    }
}

/// Extracts the `message` field of a GitHub error body, falling back to the raw body.
fn message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn error_for_status(status: StatusCode, message: String) -> Error {
    let mentions_rate_limit = message.to_ascii_lowercase().contains("rate limit");
    match status {
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::UNAUTHORIZED => Error::AuthError(message),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if mentions_rate_limit => {
            Error::RateLimitExceeded
        }
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            error!(
                error_message = %source.message,
                status = source.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );
            error_for_status(source.status_code, source.message.clone())
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::InvalidUrl(source.to_string())
        }
        octocrab::Error::Uri { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}, Failed to parse URI.",
                message
            );
            Error::InvalidUrl(source.to_string())
        }
        octocrab::Error::InvalidUtf8 { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The message wasn't valid UTF-8.",
                message,
            );
            Error::InvalidResponse
        }
        _ => {
            error!(error_message = e.to_string(), message);
            Error::Transport(e.to_string())
        }
    }
}
