//! Directory scan for onboarding many repositories at once.
//!
//! [`discover_directories`] lists a root and its sub directories down to a depth limit.
//! [`consider`] then judges each directory against the registry, the backends and the name
//! filters, suggesting a free name for the ones worth registering.

use crate::core::{
    error::Result, factory::WatchFactory, filter::RepoFilter, registry::Registry,
};
use std::path::{Path, PathBuf};

/// What a scan makes of one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanVerdict {
    /// Registered already under this name
    Watched(String),
    /// No backend recognized it (or detection failed)
    NotARepo(String),
    /// The suggested name does not pass the filters
    Filtered(String),
    /// Worth registering under the suggested name
    Candidate { name: String, kind: &'static str },
}

/// `root` followed by its sub directories, depth first in name order.
///
/// A depth of 1 means the root and its immediate children. `.git` directories are not entered.
pub fn discover_directories(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, 0, max_depth, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, depth: usize, max_depth: usize, found: &mut Vec<PathBuf>) -> Result<()> {
    found.push(dir.to_path_buf());
    if depth >= max_depth {
        return Ok(());
    }
    let mut children: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| e.file_name() != ".git")
        .map(|e| e.path())
        .collect();
    children.sort();
    for child in children {
        if let Err(e) = walk(&child, depth + 1, max_depth, found) {
            log::warn!("Skipping {}: {e}", child.display());
        }
    }
    Ok(())
}

/// `prefix + lowercase(basename)`, with a numeric suffix while the name is taken
pub fn suggest_name(registry: &Registry, dir: &Path, prefix: &str) -> String {
    let base = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "repo".to_string());
    let name = format!("{prefix}{base}");
    if registry.get(&name).is_none() {
        return name;
    }
    (1..)
        .map(|n| format!("{name}{n}"))
        .find(|candidate| registry.get(candidate).is_none())
        .unwrap_or(name)
}

pub fn consider(
    registry: &Registry,
    factory: &WatchFactory,
    filter: &RepoFilter,
    dir: &Path,
    prefix: &str,
) -> ScanVerdict {
    if let Some(name) = registry.watched(dir) {
        return ScanVerdict::Watched(name.to_string());
    }
    let name = suggest_name(registry, dir, prefix);
    let kind = match factory.create(dir, &name) {
        Ok(watch) => watch.kind(),
        Err(e) => return ScanVerdict::NotARepo(e.to_string()),
    };
    if !filter.matches(&name) {
        return ScanVerdict::Filtered(name);
    }
    ScanVerdict::Candidate { name, kind }
}
