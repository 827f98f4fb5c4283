//! Core functionality for the repos tool.
//!
//! This module provides the repository-state capability, its Git backend, the backend factory,
//! the registry of watched repositories and the concurrent check orchestrator, together with
//! error handling and output helpers.

pub mod check;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod exec;
pub mod factory;
pub mod filter;
pub mod git;
pub mod output;
pub mod registry;
pub mod scan;
pub mod state;
pub mod watch;

// === Error handling ===
pub use error::{ReposError, Result};

// === Repository state capability ===
// Uniform contract over VCS backends and the Git implementation
pub use git::{GitRemote, GitWatch, GIT_KIND};
pub use watch::{BranchRemoteState, RepoWatch, SyncOutcome};

// === Backend selection ===
pub use factory::{Detector, WatchFactory};

// === Subprocess execution ===
pub use exec::{CommandOutput, ExecOptions};

// === Registry and records ===
pub use registry::Registry;
pub use state::{CheckEntry, CheckReport, CheckResult, RepoRecord, Section};

// === Check orchestration ===
pub use check::{classify, Checker, ProgressEvent};
pub use config::{CheckConfig, Settings};
pub use filter::RepoFilter;

// === Command initialization ===
pub use command_init::{CommandContext, CommandInit};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
