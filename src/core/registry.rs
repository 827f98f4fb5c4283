//! Name → path registry of watched repositories.
//!
//! # Storage
//!
//! A single JSON object mapping each unique name to an absolute directory:
//!
//! ```text
//! {
//!   "api": "/home/me/work/api",
//!   "dotfiles": "/home/me/dotfiles"
//! }
//! ```
//!
//! The file is rewritten in full after every mutation (serialize → `.tmp` sibling →
//! `chmod 0600` → `rename`). A missing file loads as an empty registry.
//!
//! Names and paths are both unique: registering a taken name or an already watched directory
//! fails with a registry conflict.

use crate::core::{
    error::{ReposError, Result},
    factory::WatchFactory,
    state::RepoRecord,
    watch::RepoWatch,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Registry {
    store: PathBuf,
    repos: BTreeMap<String, PathBuf>,
}

impl Registry {
    /// Empty registry persisting to `store`
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            repos: BTreeMap::new(),
        }
    }

    /// Load the registry persisted at `store`
    pub fn open(store: impl Into<PathBuf>) -> Result<Self> {
        let mut registry = Self::new(store);
        registry.refresh()?;
        Ok(registry)
    }

    /// Re-read the persisted mapping. Does not error if the store does not exist.
    pub fn refresh(&mut self) -> Result<()> {
        let raw = match std::fs::read_to_string(&self.store) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No repos store at {}, starting empty", self.store.display());
                self.repos.clear();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        self.repos = serde_json::from_str(&raw).map_err(|source| ReposError::StoreParse {
            path: self.store.clone(),
            source,
        })?;
        log::debug!("Loaded {} repos from {}", self.repos.len(), self.store.display());
        Ok(())
    }

    /// Write the full mapping to the store
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.store.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = self.store.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let raw = serde_json::to_string_pretty(&self.repos)?;
        std::fs::write(&tmp, raw)?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.store)?;
        log::debug!("Persisted {} repos to {}", self.repos.len(), self.store.display());
        Ok(())
    }

    pub fn store_path(&self) -> &Path {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Path registered under `name`
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.repos.get(name).map(PathBuf::as_path)
    }

    /// Name under which `path` is registered
    pub fn watched(&self, path: &Path) -> Option<&str> {
        self.repos
            .iter()
            .find(|(_, watched)| watched.as_path() == path)
            .map(|(name, _)| name.as_str())
    }

    /// Register `path` as `name` after a backend recognized it
    pub fn add(&mut self, name: &str, path: &Path, factory: &WatchFactory) -> Result<Box<dyn RepoWatch>> {
        if let Some(existing) = self.get(name) {
            return Err(ReposError::name_taken(name, existing));
        }
        if let Some(other) = self.watched(path) {
            return Err(ReposError::path_watched(path, other));
        }
        let watch = factory.create(path, name)?;
        self.repos.insert(name.to_string(), path.to_path_buf());
        self.persist()?;
        Ok(watch)
    }

    /// Like [`Registry::add`], but an existing registration under `name` is replaced
    pub fn replace(&mut self, name: &str, path: &Path, factory: &WatchFactory) -> Result<Box<dyn RepoWatch>> {
        if let Some(other) = self.watched(path).filter(|other| *other != name) {
            return Err(ReposError::path_watched(path, other));
        }
        let watch = factory.create(path, name)?;
        self.repos.insert(name.to_string(), path.to_path_buf());
        self.persist()?;
        Ok(watch)
    }

    /// Unregister `name`; returns whether it was registered
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if self.repos.remove(name).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Move the registration of `old` to `new`, re-validating the directory
    pub fn rename(&mut self, old: &str, new: &str, factory: &WatchFactory) -> Result<()> {
        let path = self
            .get(old)
            .map(Path::to_path_buf)
            .ok_or_else(|| ReposError::repo_not_found(old))?;
        if let Some(existing) = self.get(new) {
            return Err(ReposError::name_taken(new, existing));
        }
        factory.create(&path, new)?;
        self.repos.remove(old);
        self.repos.insert(new.to_string(), path);
        self.persist()
    }

    /// Records of all registered repos, sorted by name. Construction failures are kept in the
    /// record instead of failing the listing.
    pub fn records(&self, factory: &WatchFactory) -> Vec<RepoRecord> {
        self.repos
            .iter()
            .map(|(name, path)| match factory.create(path, name) {
                Ok(watch) => RepoRecord::watched(name, path, watch),
                Err(e) => {
                    log::debug!("Repo {name} at {} is broken: {e}", path.display());
                    RepoRecord::broken(name, path, e)
                }
            })
            .collect()
    }

    /// Registered `(name, path)` pairs sorted by name
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.repos
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
