//! Repos - watch many repositories and report which need attention.
//!
//! This library keeps a registry of named repositories and checks all of them concurrently for
//! uncommitted changes and for commits that are not yet pushed to or pulled from their remotes.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`RepoWatch`] capability and its Git backend
//! - The [`WatchFactory`] that selects a backend for a directory
//! - The persistent [`Registry`] of watched repositories
//! - The concurrent [`Checker`] and its [`CheckReport`]
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Check orchestration
    classify,
    BranchRemoteState,
    CheckConfig,
    CheckEntry,
    CheckReport,
    CheckResult,
    Checker,
    // Command initialization
    CommandContext,
    CommandInit,
    Detector,
    ExecOptions,
    GitWatch,
    ProgressEvent,
    // Registry
    Registry,
    RepoFilter,
    RepoRecord,
    // Repository state capability
    RepoWatch,
    // Error handling
    ReposError,
    Result,
    Settings,
    SyncOutcome,
    WatchFactory,
};
