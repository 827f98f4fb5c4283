//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ReposError`] which covers every failure mode of the repository
//! watcher: subprocess plumbing, backend detection, registry bookkeeping and persistence.
//! It uses `thiserror` for ergonomic error definitions and includes constructor helpers for
//! the variants that carry context.
//!
//! # Public API
//! - [`ReposError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ReposError>`
//!
//! # Error Categories
//! - **Subprocess**: Nonzero exit, launch failure, bounded wait expired
//! - **Detection**: Unexpected metadata markers, no backend recognizing a directory
//! - **Registry**: Duplicate names or paths, unknown names, store location and format
//! - **Filters**: Invalid include/exclude patterns

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for repos
#[derive(Error, Debug)]
pub enum ReposError {
    // Subprocess errors
    #[error("`{command}` failed ({code}): {stderr}")]
    Subprocess {
        command: String,
        code: String,
        stderr: String,
    },

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` did not finish within {seconds}s")]
    Timeout { command: String, seconds: u64 },

    // Detection errors
    #[error("Unexpected repository layout in \"{path}\": {detail}")]
    ParseAmbiguity { path: PathBuf, detail: String },

    #[error("No implementation found to watch {path}")]
    NoBackendMatch { path: PathBuf },

    // Registry errors
    #[error("Repo with name \"{name}\" already registered for \"{path}\"")]
    NameTaken { name: String, path: PathBuf },

    #[error("Directory \"{path}\" is already watched ({name})")]
    PathWatched { path: PathBuf, name: String },

    #[error("No repo with name \"{name}\" found")]
    RepoNotFound { name: String },

    #[error("Could not determine location of the repos store (no home directory)")]
    StoreLocation,

    #[error("Failed to parse repos store \"{path}\": {source}")]
    StoreParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Filter errors
    #[error("Failed to compile {kind} pattern \"{pattern}\": {source}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ReposError
pub type Result<T> = std::result::Result<T, ReposError>;

impl ReposError {
    /// Create a subprocess failure from an exit code and captured stderr lines
    pub fn subprocess(command: impl Into<String>, code: Option<i32>, stderr: &[String]) -> Self {
        Self::Subprocess {
            command: command.into(),
            code: code
                .map(|c| format!("exit code {c}"))
                .unwrap_or_else(|| "terminated by signal".to_string()),
            stderr: stderr.join("; "),
        }
    }

    /// Create a launch failure error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }

    /// Create a timeout error
    pub fn timeout(command: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            command: command.into(),
            seconds,
        }
    }

    /// Create a parse ambiguity error
    pub fn parse_ambiguity(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::ParseAmbiguity {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn no_backend_match(path: impl Into<PathBuf>) -> Self {
        Self::NoBackendMatch { path: path.into() }
    }

    pub fn name_taken(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NameTaken {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path_watched(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self::PathWatched {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn repo_not_found(name: impl Into<String>) -> Self {
        Self::RepoNotFound { name: name.into() }
    }

    /// Create an invalid pattern error; `kind` is "include" or "exclude"
    pub fn invalid_pattern(kind: &'static str, pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            kind,
            pattern: pattern.into(),
            source,
        }
    }

    /// Whether this error comes from the registry's bookkeeping rules
    pub fn is_registry_conflict(&self) -> bool {
        matches!(self, Self::NameTaken { .. } | Self::PathWatched { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_backend_match_display() {
        let err = ReposError::no_backend_match("/tmp/nothing");
        assert_eq!(err.to_string(), "No implementation found to watch /tmp/nothing");
    }

    #[test]
    fn test_subprocess_error_joins_stderr() {
        let stderr = vec![
            "fatal: 'nope' does not appear to be a git repository".to_string(),
            "fatal: Could not read from remote repository.".to_string(),
        ];
        let err = ReposError::subprocess("git fetch nope", Some(128), &stderr);
        let msg = err.to_string();
        assert!(msg.contains("git fetch nope"));
        assert!(msg.contains("exit code 128"));
        assert!(msg.contains("does not appear to be a git repository; fatal: Could not read"));
    }

    #[test]
    fn test_subprocess_error_without_code() {
        let err = ReposError::subprocess("git status --porcelain", None, &[]);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_timeout_error() {
        let err = ReposError::timeout("git fetch origin", 30);
        assert_eq!(err.to_string(), "`git fetch origin` did not finish within 30s");
    }

    #[test]
    fn test_parse_ambiguity_error() {
        let err = ReposError::parse_ambiguity("/work/foo", "\".git\" is not a directory");
        assert!(err.to_string().contains("/work/foo"));
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_registry_conflicts() {
        assert!(ReposError::name_taken("foo", "/a").is_registry_conflict());
        assert!(ReposError::path_watched("/a", "foo").is_registry_conflict());
        assert!(!ReposError::repo_not_found("foo").is_registry_conflict());
        assert!(!ReposError::StoreLocation.is_registry_conflict());
    }

    #[test]
    fn test_invalid_pattern_error() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ReposError::invalid_pattern("include", "(unclosed", source);
        let msg = err.to_string();
        assert!(msg.contains("include pattern"));
        assert!(msg.contains("(unclosed"));
    }

    #[test]
    fn test_store_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = ReposError::StoreParse {
            path: PathBuf::from("/home/me/.repos.json"),
            source: json_err,
        };
        assert!(err.to_string().contains("/home/me/.repos.json"));
    }
}
