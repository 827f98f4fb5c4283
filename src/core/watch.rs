//! The repository-state capability every VCS backend implements.
//!
//! A watch is bound to one `(path, name)` pair and holds no state between calls: each method
//! queries the VCS tool afresh. Watches are `Send + Sync` so the check orchestrator can hand
//! them to worker threads.

use crate::core::error::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Outcome of comparing one local branch against the same branch on one remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyncOutcome {
    /// Local and remote tips have the same content
    Same,
    /// Local has commits the remote lacks
    Ahead,
    /// Remote has commits local lacks
    Behind,
    /// Branch exists locally but not on the remote
    Missing,
    /// The comparison itself failed
    Fail,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Same => "same",
            SyncOutcome::Ahead => "ahead",
            SyncOutcome::Behind => "behind",
            SyncOutcome::Missing => "missing",
            SyncOutcome::Fail => "fail",
        }
    }

    pub fn is_same(&self) -> bool {
        matches!(self, SyncOutcome::Same)
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(remote, branch)` cell of the sync matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRemoteState {
    pub remote: String,
    pub branch: String,
    pub outcome: SyncOutcome,
    /// Set only when `outcome` is [`SyncOutcome::Fail`]
    pub error: Option<String>,
}

impl BranchRemoteState {
    pub fn new(remote: &str, branch: &str, outcome: SyncOutcome) -> Self {
        Self {
            remote: remote.to_string(),
            branch: branch.to_string(),
            outcome,
            error: None,
        }
    }

    pub fn failed(remote: &str, branch: &str, error: impl fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(remote, branch, SyncOutcome::Fail)
        }
    }
}

/// Uniform contract over VCS-specific repository querying.
///
/// All operations may block on subprocess I/O and none of them retries. Failures are returned,
/// they never abort unrelated operations.
pub trait RepoWatch: Send + Sync {
    /// Whether any tracked or untracked file differs from the last commit
    fn changes(&self) -> Result<bool>;

    /// Configured remote names, de-duplicated, in first-seen order
    fn remotes(&self) -> Result<Vec<String>>;

    /// First non-[`SyncOutcome::Same`] outcome over remotes, then branches, in listing order.
    ///
    /// Branches that do not exist on a remote are skipped.
    fn synced(&self) -> Result<SyncOutcome>;

    /// Every `(remote, branch)` pair. A failing pair becomes [`SyncOutcome::Fail`] without
    /// aborting the rest; no remotes yields an empty vector.
    fn states(&self) -> Result<Vec<BranchRemoteState>>;

    /// Backend discriminator, e.g. `"Git"`
    fn kind(&self) -> &'static str;

    fn name(&self) -> &str;

    fn path(&self) -> &Path;
}

impl fmt::Debug for dyn RepoWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoWatch")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("path", &self.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(SyncOutcome::Same.to_string(), "same");
        assert_eq!(SyncOutcome::Behind.to_string(), "behind");
        assert!(SyncOutcome::Same.is_same());
        assert!(!SyncOutcome::Missing.is_same());
    }

    #[test]
    fn test_failed_state_keeps_error_text() {
        let state = BranchRemoteState::failed("origin", "main", "boom");
        assert_eq!(state.outcome, SyncOutcome::Fail);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.remote, "origin");
        assert_eq!(state.branch, "main");
    }
}
