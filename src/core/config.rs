use crate::core::dirs::get_default_store_path;
use crate::core::error::ReposError;
use crate::core::exec::{ExecOptions, DEFAULT_TIMEOUT};
use std::path::PathBuf;

/// Default size of the check worker pool
pub const DEFAULT_WORKERS: usize = 8;

/// Default bounded wait for one subprocess call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();

/// Configuration of a check run, passed to [`crate::core::check::Checker::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Upper bound of repos evaluated at the same time
    pub workers: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Everything the command line configures, collected in one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store: PathBuf,
    pub verbosity: u8,
    pub workers: usize,
    pub timeout_secs: u64,
}

impl Settings {
    /// Settings with the store resolved to `~/.repos.json` unless given
    pub fn resolve(store: Option<PathBuf>, verbosity: u8, workers: usize, timeout_secs: u64) -> Result<Self, ReposError> {
        let store = match store {
            Some(store) => store,
            None => get_default_store_path()?,
        };
        Ok(Self {
            store,
            verbosity,
            workers: workers.max(1),
            timeout_secs,
        })
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions::from_secs(self.timeout_secs)
    }

    pub fn check_config(&self) -> CheckConfig {
        CheckConfig {
            workers: self.workers,
        }
    }

    /// `RUST_LOG` filter matching the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// The progress line would interleave with log output, so it is only drawn when quiet
    pub fn show_progress(&self) -> bool {
        self.verbosity == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolve_keeps_explicit_store() {
        let settings = Settings::resolve(Some(PathBuf::from("/tmp/r.json")), 0, 4, 30).unwrap();
        assert_eq!(settings.store, PathBuf::from("/tmp/r.json"));
        assert_eq!(settings.check_config().workers, 4);
        assert_eq!(settings.exec_options().timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_workers_becomes_one() {
        let settings = Settings::resolve(Some(PathBuf::from("/tmp/r.json")), 0, 0, 0).unwrap();
        assert_eq!(settings.workers, 1);
        assert_eq!(settings.exec_options().timeout, None);
    }

    #[test]
    fn test_log_filter_by_verbosity() {
        let mut settings = Settings::resolve(Some(PathBuf::from("/tmp/r.json")), 0, 1, 1).unwrap();
        assert_eq!(settings.log_filter(), "warn");
        assert!(settings.show_progress());
        settings.verbosity = 2;
        assert_eq!(settings.log_filter(), "debug");
        assert!(!settings.show_progress());
        settings.verbosity = 9;
        assert_eq!(settings.log_filter(), "trace");
    }
}
