//! Paginated walk over the repositories a user owns.

use std::sync::Arc;

use github_client::{RepositoryClient, RepositoryDescriptor};
use tracing::{debug, error, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "lister_tests.rs"]
mod tests;

/// Walks `GET /users/{username}/repos` page by page.
///
/// The lister is single-pass: once it has reported the end of the listing or an
/// error, every further call to [`next_page`](Self::next_page) returns `Ok(None)`.
pub struct RepositoryLister {
    client: Arc<dyn RepositoryClient>,
    username: String,
    page_size: u8,
    next_page: u32,
    exhausted: bool,
}

impl RepositoryLister {
    /// Creates a lister that starts at the first page.
    pub fn new(client: Arc<dyn RepositoryClient>, username: impl Into<String>, page_size: u8) -> Self {
        Self {
            client,
            username: username.into(),
            page_size,
            next_page: 1,
            exhausted: false,
        }
    }

    /// The page number the next call will fetch.
    pub fn current_page(&self) -> u32 {
        self.next_page
    }

    /// Fetches the next page of repositories.
    ///
    /// Returns `Ok(None)` once GitHub returns an empty page.
    ///
    /// # Errors
    ///
    /// Returns `Error::Listing` carrying the failed page number if the page cannot be
    /// fetched. The lister is exhausted afterwards; a partial listing is never resumed.
    pub async fn next_page(&mut self) -> Result<Option<Vec<RepositoryDescriptor>>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.next_page;
        debug!(
            username = %self.username,
            page = page,
            "Fetching page {} of repositories",
            page
        );

        let repos = match self
            .client
            .list_user_repositories(&self.username, page, self.page_size)
            .await
        {
            Ok(repos) => repos,
            Err(source) => {
                self.exhausted = true;
                error!(
                    username = %self.username,
                    page = page,
                    error = %source,
                    "Failed to list repositories"
                );
                return Err(Error::Listing { page, source });
            }
        };

        if repos.is_empty() {
            self.exhausted = true;
            info!(
                username = %self.username,
                total_pages = page - 1,
                "No more repositories to process"
            );
            return Ok(None);
        }

        self.next_page += 1;
        Ok(Some(repos))
    }
}
