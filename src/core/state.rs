//! Repository records and check results.
//!
//! # Public API
//! - [`RepoRecord`]: A registered repository together with its constructed watch (or the error
//!   that prevented construction)
//! - [`CheckResult`]: Terminal classification of one repository
//! - [`CheckEntry`]: Typed content of an outcome bucket
//! - [`CheckReport`]: Aggregated buckets of a whole check run

use crate::core::watch::RepoWatch;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Type tag of records whose watch could not be constructed
pub const UNDEFINED_KIND: &str = "UNDEF";

#[derive(Debug)]
pub struct RepoRecord {
    pub name: String,
    pub path: PathBuf,
    pub kind: String,
    pub error: Option<String>,
    pub watch: Option<Box<dyn RepoWatch>>,
}

impl RepoRecord {
    pub fn watched(name: impl Into<String>, path: impl Into<PathBuf>, watch: Box<dyn RepoWatch>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: watch.kind().to_string(),
            error: None,
            watch: Some(watch),
        }
    }

    pub fn broken(name: impl Into<String>, path: impl Into<PathBuf>, error: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: UNDEFINED_KIND.to_string(),
            error: Some(error.to_string()),
            watch: None,
        }
    }
}

/// Terminal classification of a repository, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CheckResult {
    Error,
    LocalChanges,
    Ahead,
    Behind,
    Unchanged,
}

impl CheckResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::Error => "error",
            CheckResult::LocalChanges => "local changes",
            CheckResult::Ahead => "ahead",
            CheckResult::Behind => "behind",
            CheckResult::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: String,
    pub result: CheckResult,
    pub error: Option<String>,
}

/// Rendered sections of a report, in their fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Errors,
    LocalChanges,
    Ahead,
    Behind,
}

impl Section {
    pub const ORDER: [Section; 4] = [
        Section::Errors,
        Section::LocalChanges,
        Section::Ahead,
        Section::Behind,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Errors => "errors",
            Section::LocalChanges => "local changes",
            Section::Ahead => "ahead of remote",
            Section::Behind => "behind remote",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Section::Errors => None,
            Section::LocalChanges => Some("Eg uncommitted changes"),
            Section::Ahead => Some("Eg local has commits which are not pushed to (at least one) remote"),
            Section::Behind => Some("Eg remote has commits which are not merged into local"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub errors: Vec<CheckEntry>,
    pub local_changes: Vec<CheckEntry>,
    pub ahead: Vec<CheckEntry>,
    pub behind: Vec<CheckEntry>,
    pub unchanged: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn bucket(&self, section: Section) -> &[CheckEntry] {
        match section {
            Section::Errors => &self.errors,
            Section::LocalChanges => &self.local_changes,
            Section::Ahead => &self.ahead,
            Section::Behind => &self.behind,
        }
    }

    /// Non-empty sections in render order
    pub fn sections(&self) -> Vec<(Section, &[CheckEntry])> {
        Section::ORDER
            .iter()
            .map(|section| (*section, self.bucket(*section)))
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }

    pub fn all_in_sync(&self) -> bool {
        self.sections().is_empty()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
