//! # Models
//!
//! Wire-level data models returned by the GitHub repository listing endpoint.
//!
//! Only the handful of fields the fork purger needs are kept; everything else in
//! the GitHub payload is ignored during deserialization.

use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Owner block embedded in every repository listing entry.
#[derive(Debug, Clone, Deserialize)]
struct RepositoryOwner {
    login: String,
}

/// Shape of one element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
struct RepositoryListing {
    name: String,
    owner: RepositoryOwner,
    fork: bool,
    url: String,
}

/// A repository as reported by one page of the user repository listing.
///
/// The `api_url` is the REST URL of the repository itself
/// (`https://api.github.com/repos/{owner}/{name}`), which is also the target of
/// the `DELETE` call that removes it.
///
/// # Examples
///
/// ```rust
/// use github_client::models::RepositoryDescriptor;
///
/// let repo = RepositoryDescriptor {
///     owner: "alice".to_string(),
///     name: "r2".to_string(),
///     is_fork: true,
///     api_url: "https://api.github.com/repos/alice/r2".to_string(),
/// };
///
/// assert_eq!(repo.full_name(), "alice/r2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RepositoryListing")]
pub struct RepositoryDescriptor {
    /// Login of the account that owns the repository
    pub owner: String,
    /// The name of the repository (without owner)
    pub name: String,
    /// Whether GitHub flags the repository as a fork
    pub is_fork: bool,
    /// REST API URL of the repository
    pub api_url: String,
}

impl RepositoryDescriptor {
    /// Returns the `owner/name` form of the repository name.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl From<RepositoryListing> for RepositoryDescriptor {
    fn from(value: RepositoryListing) -> Self {
        Self {
            owner: value.owner.login,
            name: value.name,
            is_fork: value.fork,
            api_url: value.url,
        }
    }
}
