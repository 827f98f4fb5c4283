//! Backend selection for repository directories.
//!
//! [`WatchFactory`] holds an ordered list of detectors. Each detector inspects a directory and
//! either declines (`Ok(None)`), claims it (`Ok(Some(watch))`) or fails (`Err`). Detectors run
//! in registration order, the first claim wins and the first failure aborts the search.
//!
//! Built-in registration order (see [`WatchFactory::default`]):
//! 1. Git ([`GitWatch::detect`])

use crate::core::{
    error::{ReposError, Result},
    exec::ExecOptions,
    git::GitWatch,
    watch::RepoWatch,
};
use std::path::Path;

/// Recognizes a directory as one VCS kind and builds its watch
pub type Detector = fn(path: &Path, name: &str, exec: &ExecOptions) -> Result<Option<Box<dyn RepoWatch>>>;

#[derive(Clone)]
pub struct WatchFactory {
    detectors: Vec<Detector>,
    exec: ExecOptions,
}

impl Default for WatchFactory {
    fn default() -> Self {
        Self::new(ExecOptions::default())
    }
}

impl WatchFactory {
    /// Factory with the built-in detectors
    pub fn new(exec: ExecOptions) -> Self {
        Self::empty(exec).register(GitWatch::detect)
    }

    /// Factory without any detector
    pub fn empty(exec: ExecOptions) -> Self {
        Self {
            detectors: Vec::new(),
            exec,
        }
    }

    /// Append a detector; it is consulted after every detector registered before it
    pub fn register(mut self, detector: Detector) -> Self {
        self.detectors.push(detector);
        self
    }

    pub fn exec_options(&self) -> &ExecOptions {
        &self.exec
    }

    /// Build the watch of the first detector claiming `path`
    pub fn create(&self, path: &Path, name: &str) -> Result<Box<dyn RepoWatch>> {
        for detect in &self.detectors {
            if let Some(watch) = detect(path, name, &self.exec)? {
                log::debug!("{} at {} is a {} repo", name, path.display(), watch.kind());
                return Ok(watch);
            }
        }
        Err(ReposError::no_backend_match(path))
    }
}
