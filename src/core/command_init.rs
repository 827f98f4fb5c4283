//! Centralized initialization shared by all commands.
//!
//! This module provides [`CommandInit`] which turns [`Settings`] into a [`CommandContext`]:
//! the loaded registry plus a watch factory configured with the subprocess options.
//!
//! # Initialization Steps
//! 1. **Store loading**: Read the registry from the configured store (missing store is empty)
//! 2. **Factory setup**: Built-in detectors with the configured bounded wait
//! 3. **Record selection**: Optional include/exclude filtering of the registered repos

use crate::core::{
    config::Settings,
    error::Result,
    factory::WatchFactory,
    filter::RepoFilter,
    registry::Registry,
    state::RepoRecord,
};

/// Everything a command needs to operate on the registered repos
pub struct CommandContext {
    pub settings: Settings,
    pub registry: Registry,
    pub factory: WatchFactory,
}

impl CommandContext {
    /// Registered repos passing the name filters, sorted by name
    pub fn filtered_records(&self, include: Option<&str>, exclude: Option<&str>) -> Result<Vec<RepoRecord>> {
        let filter = RepoFilter::new(include, exclude)?;
        Ok(filter.apply(self.registry.records(&self.factory)))
    }
}

pub struct CommandInit;

impl CommandInit {
    pub fn initialize(settings: Settings) -> Result<CommandContext> {
        log::debug!("Using repos store {}", settings.store.display());
        let registry = Registry::open(&settings.store)?;
        let factory = WatchFactory::new(settings.exec_options());
        Ok(CommandContext {
            settings,
            registry,
            factory,
        })
    }
}
