//! # Models
//!
//! Values that flow through a purge run: the targets placed on the queue, the
//! outcome of each delete attempt and the aggregate report handed back to the caller.

use github_client::RepositoryDescriptor;
use serde::Serialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A repository scheduled for deletion, addressed by its REST API URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeleteTarget {
    /// REST API URL of the repository, also the `DELETE` target
    pub api_url: String,
}

impl DeleteTarget {
    /// Creates a target for the given API URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Builds the delete target for a repository if, and only if, it is a fork.
    pub fn from_descriptor(descriptor: &RepositoryDescriptor) -> Option<Self> {
        descriptor
            .is_fork
            .then(|| Self::new(descriptor.api_url.clone()))
    }
}

/// The result of one delete attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    /// The repository the attempt was made for
    pub target: DeleteTarget,
    /// Whether GitHub confirmed the deletion
    pub succeeded: bool,
    /// Why the deletion failed, if it did
    pub error_detail: Option<String>,
}

impl DeletionOutcome {
    /// Records a confirmed deletion.
    pub fn succeeded(target: DeleteTarget) -> Self {
        Self {
            target,
            succeeded: true,
            error_detail: None,
        }
    }

    /// Records a failed deletion together with the reason.
    pub fn failed(target: DeleteTarget, detail: impl Into<String>) -> Self {
        Self {
            target,
            succeeded: false,
            error_detail: Some(detail.into()),
        }
    }
}

/// Whether a run actually deletes repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// List the forks that would be deleted; never issue a `DELETE`.
    #[default]
    DryRun,
    /// Delete every fork found.
    Execute,
}

impl RunMode {
    /// Maps the `--delete` switch onto a run mode.
    pub fn from_delete_flag(delete: bool) -> Self {
        if delete {
            RunMode::Execute
        } else {
            RunMode::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

/// The aggregate result of a completed run.
///
/// Entries are ordered by the position at which the fork was found in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "entries", rename_all = "snake_case")]
pub enum RunReport {
    /// Dry run: the forks that would have been deleted.
    Planned(Vec<DeleteTarget>),
    /// Execute: one outcome per delete attempt.
    Deleted(Vec<DeletionOutcome>),
}

impl RunReport {
    /// Number of forks covered by the report.
    pub fn len(&self) -> usize {
        match self {
            RunReport::Planned(targets) => targets.len(),
            RunReport::Deleted(outcomes) => outcomes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of confirmed deletions (always zero for a dry run).
    pub fn succeeded_count(&self) -> usize {
        match self {
            RunReport::Planned(_) => 0,
            RunReport::Deleted(outcomes) => outcomes.iter().filter(|o| o.succeeded).count(),
        }
    }

    /// Number of failed deletions (always zero for a dry run).
    pub fn failed_count(&self) -> usize {
        match self {
            RunReport::Planned(_) => 0,
            RunReport::Deleted(outcomes) => outcomes.iter().filter(|o| !o.succeeded).count(),
        }
    }

    /// The API URLs covered by the report, in discovery order.
    pub fn api_urls(&self) -> Vec<&str> {
        match self {
            RunReport::Planned(targets) => targets.iter().map(|t| t.api_url.as_str()).collect(),
            RunReport::Deleted(outcomes) => outcomes
                .iter()
                .map(|o| o.target.api_url.as_str())
                .collect(),
        }
    }
}
