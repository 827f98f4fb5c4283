//! Include/exclude name filters applied before a check or scan.

use crate::core::error::{ReposError, Result};
use crate::core::state::RepoRecord;
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct RepoFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl RepoFilter {
    /// Compile the patterns; empty or absent patterns do not filter
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: compile("include", include)?,
            exclude: compile("exclude", exclude)?,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(name) {
                log::trace!("Exclude repo {name} since not matching include");
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                log::trace!("Exclude repo {name} since matching exclude");
                return false;
            }
        }
        true
    }

    /// Keep the records whose name passes, preserving order
    pub fn apply(&self, records: Vec<RepoRecord>) -> Vec<RepoRecord> {
        records.into_iter().filter(|r| self.matches(&r.name)).collect()
    }
}

fn compile(kind: &'static str, pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern.filter(|p| !p.is_empty()) {
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| ReposError::invalid_pattern(kind, p, e)),
        None => Ok(None),
    }
}
