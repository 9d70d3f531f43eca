//! In-memory `RepositoryClient` used by the pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use github_client::{Error as GitHubError, RepositoryClient, RepositoryDescriptor};
use tokio::sync::Notify;

pub(crate) const OWNER: &str = "alice";

pub(crate) fn api_url(name: &str) -> String {
    format!("https://api.github.com/repos/{OWNER}/{name}")
}

pub(crate) fn repo(name: &str, is_fork: bool) -> RepositoryDescriptor {
    RepositoryDescriptor {
        owner: OWNER.to_string(),
        name: name.to_string(),
        is_fork,
        api_url: api_url(name),
    }
}

/// Two pages of three repositories each; r2, r4 and r6 are forks.
pub(crate) fn alice_pages() -> Vec<Vec<RepositoryDescriptor>> {
    vec![
        vec![repo("r1", false), repo("r2", true), repo("r3", false)],
        vec![repo("r4", true), repo("r5", false), repo("r6", true)],
    ]
}

enum MockPage {
    Repos(Vec<RepositoryDescriptor>),
    Fail(u16),
}

/// Scripted listing pages and delete responses, with call counters.
pub(crate) struct MockRepositoryClient {
    pages: Vec<MockPage>,
    delete_failures: HashMap<String, u16>,
    delete_delay: Option<Duration>,
    gated_page: Option<u32>,
    delete_seen: Notify,
    in_flight: AtomicUsize,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    max_in_flight: AtomicUsize,
    deleted: Mutex<Vec<String>>,
}

impl MockRepositoryClient {
    pub(crate) fn new() -> Self {
        Self {
            pages: Vec::new(),
            delete_failures: HashMap::new(),
            delete_delay: None,
            gated_page: None,
            delete_seen: Notify::new(),
            in_flight: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_pages(mut self, pages: Vec<Vec<RepositoryDescriptor>>) -> Self {
        self.pages.extend(pages.into_iter().map(MockPage::Repos));
        self
    }

    pub(crate) fn with_failing_page(mut self, status: u16) -> Self {
        self.pages.push(MockPage::Fail(status));
        self
    }

    pub(crate) fn with_delete_failure(mut self, name: &str, status: u16) -> Self {
        self.delete_failures.insert(api_url(name), status);
        self
    }

    pub(crate) fn with_delete_delay(mut self, delay: Duration) -> Self {
        self.delete_delay = Some(delay);
        self
    }

    /// Holds back `page` until at least one delete has been attempted.
    pub(crate) fn with_page_gated_on_first_delete(mut self, page: u32) -> Self {
        self.gated_page = Some(page);
        self
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn list_user_repositories(
        &self,
        username: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<Vec<RepositoryDescriptor>, GitHubError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(username, OWNER);

        if self.gated_page == Some(page) {
            self.delete_seen.notified().await;
        }

        match self.pages.get((page - 1) as usize) {
            Some(MockPage::Repos(repos)) => Ok(repos.clone()),
            Some(MockPage::Fail(status)) => Err(GitHubError::Api {
                status: *status,
                message: "listing failed".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn delete_repository(&self, api_url: &str) -> Result<(), GitHubError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_seen.notify_one();

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delete_delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(status) = self.delete_failures.get(api_url) {
            return Err(GitHubError::Api {
                status: *status,
                message: "Must have admin rights to Repository.".to_string(),
            });
        }

        self.deleted.lock().unwrap().push(api_url.to_string());
        Ok(())
    }
}
