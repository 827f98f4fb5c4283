//! Git backend for [`RepoWatch`].
//!
//! This module provides [`GitWatch`], which answers every watch query by running the `git`
//! executable inside the repository and scraping its default text output line by line.
//!
//! # Public API
//! - [`GitWatch`]: Watch of one Git working tree
//! - [`GitWatch::detect`]: Detector registered with the watch factory
//! - [`GitRemote`]: One configured remote with its push capability
//!
//! # Derivation
//! - **Local changes**: any line of `git status --porcelain`
//! - **Branches**: `git branch --no-color`, current-branch marker stripped
//! - **Remotes**: `git remote -v`, de-duplicated by name, first occurrence wins
//! - **Divergence**: fetch each remote once, diff local tip against remote tip, then classify the
//!   direction with a dry-run push (or commit ancestry for read-only remotes)

use crate::core::{
    error::{ReposError, Result},
    exec::{self, ExecOptions},
    watch::{BranchRemoteState, RepoWatch, SyncOutcome},
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Type tag of Git watches
pub const GIT_KIND: &str = "Git";

/// Public hosts where anonymous (non-SSH) clones cannot be pushed to
const READ_ONLY_HOSTS: &[&str] = &["github.com"];

const PUSH_REJECTED_MARKERS: &[&str] = &["[rejected]", "the tip of your current branch is behind"];

/// A configured remote of a Git repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemote {
    pub name: String,
    pub url: String,
    pub pushable: bool,
}

pub struct GitWatch {
    name: String,
    path: PathBuf,
    exec: ExecOptions,
}

impl GitWatch {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, exec: ExecOptions) -> Self {
        GitWatch {
            name: name.into(),
            path: path.into(),
            exec,
        }
    }

    /// Recognize `path` as a Git working tree.
    ///
    /// A missing `.git` entry means "not mine"; a `.git` entry that is not a directory is an
    /// error, so corruption is never mistaken for absence.
    pub fn detect(path: &Path, name: &str, exec: &ExecOptions) -> Result<Option<Box<dyn RepoWatch>>> {
        let marker = path.join(".git");
        match std::fs::metadata(&marker) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReposError::Io(e)),
            Ok(meta) if !meta.is_dir() => Err(ReposError::parse_ambiguity(
                path,
                "found \".git\", but it is not a directory",
            )),
            Ok(_) => Ok(Some(Box::new(GitWatch::new(path, name, *exec)))),
        }
    }

    /// Run git and return its stdout lines, failing on nonzero exit
    fn git(&self, args: &[&str]) -> Result<Vec<String>> {
        log::debug!("Git exec [{}: {}]", self.name, self.path.display());
        Ok(exec::run_checked("git", args, &self.path, &self.exec)?.stdout)
    }

    /// Local branch names in listing order
    pub fn branches(&self) -> Result<Vec<String>> {
        Ok(parse_branches(&self.git(&["branch", "--no-color"])?))
    }

    /// Configured remotes, de-duplicated by name
    pub fn remote_list(&self) -> Result<Vec<GitRemote>> {
        Ok(parse_remotes(&self.git(&["remote", "-v"])?))
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.git(&["fetch", remote]).map(|_| ())
    }

    fn remote_branches(&self, remote: &str) -> Result<HashSet<String>> {
        let lines = self.git(&["branch", "-a", "--no-color"])?;
        Ok(parse_remote_branches(&lines, remote))
    }

    /// Compare a local branch with its counterpart on `remote`, which must exist there
    fn compare(&self, remote: &GitRemote, branch: &str) -> Result<SyncOutcome> {
        let tracking = format!("{}/{}", remote.name, branch);
        let changed = self.git(&["diff", "--name-only", branch, tracking.as_str(), "--"])?;
        if changed.is_empty() {
            return Ok(SyncOutcome::Same);
        }
        if remote.pushable {
            self.push_direction(&remote.name, branch)
        } else {
            self.ancestry_direction(branch, &tracking)
        }
    }

    /// Ask a dry-run push which side is ahead. Push reports a rejection through a nonzero
    /// exit, so the output is judged before the status.
    fn push_direction(&self, remote: &str, branch: &str) -> Result<SyncOutcome> {
        let output = exec::run("git", &["push", "--dry-run", remote, branch], &self.path, &self.exec)?;
        let lines: Vec<&String> = output.all_lines().collect();
        match push_outcome(&lines) {
            Some(outcome) => Ok(outcome),
            None if !output.success => Err(ReposError::subprocess(
                output.command,
                output.code,
                &output.stderr,
            )),
            None => Err(ReposError::parse_ambiguity(
                &self.path,
                format!("dry-run push to {remote} produced no output"),
            )),
        }
    }

    /// Direction from commit ancestry, used where a push cannot be attempted
    fn ancestry_direction(&self, branch: &str, tracking: &str) -> Result<SyncOutcome> {
        let range = format!("{branch}...{tracking}");
        let lines = self.git(&["rev-list", "--left-right", "--count", range.as_str()])?;
        let counts = lines.first().and_then(|line| parse_left_right(line));
        match counts {
            Some((_, behind)) if behind > 0 => Ok(SyncOutcome::Behind),
            Some((ahead, _)) if ahead > 0 => Ok(SyncOutcome::Ahead),
            Some(_) => Ok(SyncOutcome::Same),
            None => Err(ReposError::parse_ambiguity(
                &self.path,
                format!("unreadable rev-list output for {range}"),
            )),
        }
    }
}

impl RepoWatch for GitWatch {
    fn changes(&self) -> Result<bool> {
        Ok(!self.git(&["status", "--porcelain"])?.is_empty())
    }

    fn remotes(&self) -> Result<Vec<String>> {
        Ok(self.remote_list()?.into_iter().map(|r| r.name).collect())
    }

    fn synced(&self) -> Result<SyncOutcome> {
        let remotes = self.remote_list()?;
        if remotes.is_empty() {
            return Ok(SyncOutcome::Same);
        }
        let branches = self.branches()?;

        for remote in &remotes {
            self.fetch(&remote.name)?;
            let on_remote = self.remote_branches(&remote.name)?;
            for branch in branches.iter().filter(|b| on_remote.contains(*b)) {
                let outcome = self.compare(remote, branch)?;
                if !outcome.is_same() {
                    log::debug!("{}: {}/{} is {}", self.name, remote.name, branch, outcome);
                    return Ok(outcome);
                }
            }
        }
        Ok(SyncOutcome::Same)
    }

    fn states(&self) -> Result<Vec<BranchRemoteState>> {
        let remotes = self.remote_list()?;
        if remotes.is_empty() {
            return Ok(Vec::new());
        }
        let branches = self.branches()?;
        let mut states = Vec::with_capacity(remotes.len() * branches.len());

        for remote in &remotes {
            let on_remote = match self
                .fetch(&remote.name)
                .and_then(|_| self.remote_branches(&remote.name))
            {
                Ok(on_remote) => on_remote,
                Err(e) => {
                    log::warn!("{}: cannot inspect remote {}: {}", self.name, remote.name, e);
                    states.extend(
                        branches
                            .iter()
                            .map(|branch| BranchRemoteState::failed(&remote.name, branch, &e)),
                    );
                    continue;
                }
            };

            for branch in &branches {
                let state = if !on_remote.contains(branch) {
                    BranchRemoteState::new(&remote.name, branch, SyncOutcome::Missing)
                } else {
                    match self.compare(remote, branch) {
                        Ok(outcome) => BranchRemoteState::new(&remote.name, branch, outcome),
                        Err(e) => BranchRemoteState::failed(&remote.name, branch, e),
                    }
                };
                states.push(state);
            }
        }
        Ok(states)
    }

    fn kind(&self) -> &'static str {
        GIT_KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse `git branch --no-color` output
fn parse_branches(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim_start_matches(&['*', '+'][..]).trim())
        // "(HEAD detached at 1a2b3c4)" is not a branch
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(str::to_string)
        .collect()
}

/// Parse `git remote -v` output: `<name>\t<url> (fetch|push)`
fn parse_remotes(lines: &[String]) -> Vec<GitRemote> {
    let mut seen = HashSet::new();
    let mut remotes = Vec::new();
    for line in lines {
        // The url may contain spaces, so only the name and the trailing direction are split off.
        let parsed = line
            .split_once('\t')
            .and_then(|(name, rest)| Some((name.trim(), rest.rsplit_once(' ')?.0.trim())))
            .filter(|(name, url)| !name.is_empty() && !url.is_empty());
        let Some((name, url)) = parsed else {
            log::warn!("Ignoring unexpected remote line: {line}");
            continue;
        };
        if seen.insert(name.to_string()) {
            remotes.push(GitRemote {
                name: name.to_string(),
                url: url.to_string(),
                pushable: is_pushable(url),
            });
        }
    }
    remotes
}

/// Remotes on read-only public hosts are only pushable over SSH
fn is_pushable(url: &str) -> bool {
    if READ_ONLY_HOSTS.iter().any(|host| url.contains(host)) {
        url.starts_with("git@") || url.starts_with("ssh://")
    } else {
        true
    }
}

/// Branch names of `remote` from `git branch -a` output (`remotes/<remote>/<branch>`)
fn parse_remote_branches(lines: &[String], remote: &str) -> HashSet<String> {
    let prefix = format!("remotes/{remote}/");
    lines
        .iter()
        .filter_map(|line| line.trim_start_matches(&['*', '+'][..]).trim().strip_prefix(&prefix))
        // symbolic refs: "remotes/origin/HEAD -> origin/main"
        .filter(|branch| !branch.contains(" -> "))
        .map(str::to_string)
        .collect()
}

/// Direction from dry-run push output; `None` when there is no output to judge
fn push_outcome(lines: &[&String]) -> Option<SyncOutcome> {
    if lines.is_empty() {
        return None;
    }
    let rejected = lines
        .iter()
        .any(|line| PUSH_REJECTED_MARKERS.iter().any(|marker| line.contains(marker)));
    Some(if rejected {
        SyncOutcome::Behind
    } else {
        SyncOutcome::Ahead
    })
}

/// Parse `git rev-list --left-right --count` output: `<left>\t<right>`
fn parse_left_right(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let left = parts.next()?.parse().ok()?;
    let right = parts.next()?.parse().ok()?;
    Some((left, right))
}
