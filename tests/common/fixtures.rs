//! Test data generation utilities and predefined scenarios
//!
//! Each scenario returns a clone of a bare remote in one specific state, so tests can
//! assert exactly one classification per repository.

#![allow(dead_code)]

use super::repository::*;
use repos::core::error::Result;

/// Scenario: clone identical to its remote
pub fn create_clean_clone() -> Result<RemotePair> {
    setup_remote_pair()
}

/// Scenario: clone with an uncommitted modification
pub fn create_dirty_clone() -> Result<RemotePair> {
    let pair = setup_remote_pair()?;
    create_file(&pair.local, "initial.txt", "modified content\n")?;
    Ok(pair)
}

/// Scenario: clone with a committed but unpushed change
pub fn create_ahead_clone() -> Result<RemotePair> {
    let pair = setup_remote_pair()?;
    commit_file(&pair.local, "feature.txt", "feature\n", "Add feature")?;
    Ok(pair)
}

/// Scenario: the remote received a commit the clone has not merged
pub fn create_behind_clone() -> Result<RemotePair> {
    let pair = setup_remote_pair()?;
    let other = pair.root().join("other");
    clone_repo(&pair.remote, &other)?;
    commit_file(&other, "upstream.txt", "upstream\n", "Upstream change")?;
    push(&other, "origin", "main")?;
    Ok(pair)
}

/// Scenario: clone with an extra local branch that was never pushed
pub fn create_clone_with_local_branch() -> Result<RemotePair> {
    let pair = setup_remote_pair()?;
    git(&pair.local, &["branch", "topic"])?;
    Ok(pair)
}

/// Scenario: clone whose only remote points at a path that no longer exists
pub fn create_clone_with_unreachable_remote() -> Result<RemotePair> {
    let pair = setup_remote_pair()?;
    let gone = pair.root().join("gone.git");
    let gone_str = gone.to_string_lossy();
    git(&pair.local, &["remote", "set-url", "origin", gone_str.as_ref()])?;
    Ok(pair)
}
