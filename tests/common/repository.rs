//! Git repository management and setup utilities
//!
//! Provides functions for creating working repositories, bare remotes and clones
//! in temporary directories, driven through the real git binary.

#![allow(dead_code)]

use repos::core::error::{ReposError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A bare remote and one clone of it, both below one temporary directory
pub struct RemotePair {
    pub temp_dir: TempDir,
    pub remote: PathBuf,
    pub local: PathBuf,
}

impl RemotePair {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Runs git in `dir` and fails with the captured stderr if git does
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(ReposError::Io)?;
    if !output.status.success() {
        let stderr: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string)
            .collect();
        return Err(ReposError::subprocess(
            format!("git {}", args.join(" ")),
            output.status.code(),
            &stderr,
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Identity and signing settings so commits never prompt
pub fn configure_user(repo_path: &Path) -> Result<()> {
    git(repo_path, &["config", "user.name", "Test User"])?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Initializes `path` as a working repository on branch `main`
pub fn init_repo(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    git(path, &["init"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    configure_user(path)
}

/// Initializes `path` as a bare repository whose HEAD is `main`
pub fn init_bare(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    git(path, &["init", "--bare"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    Ok(())
}

/// Clones `remote` into `target` and configures the clone
pub fn clone_repo(remote: &Path, target: &Path) -> Result<()> {
    let parent = target.parent().unwrap_or(target);
    let remote = remote.to_string_lossy();
    let target_str = target.to_string_lossy();
    git(parent, &["clone", remote.as_ref(), target_str.as_ref()])?;
    configure_user(target)
}

/// Sets up a fresh git repository without remotes
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("work");
    init_repo(&path)?;
    Ok(TestRepo { temp_dir, path })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    commit_file(&repo.path, "initial.txt", "initial content\n", "Initial commit")?;
    Ok(repo)
}

/// Sets up a bare remote holding one commit on `main` and a clone tracking it
pub fn setup_remote_pair() -> Result<RemotePair> {
    let temp_dir = TempDir::new()?;
    let remote = temp_dir.path().join("remote.git");
    let seed = temp_dir.path().join("seed");
    let local = temp_dir.path().join("local");

    init_bare(&remote)?;
    init_repo(&seed)?;
    commit_file(&seed, "initial.txt", "initial content\n", "Initial commit")?;
    let remote_str = remote.to_string_lossy();
    git(&seed, &["remote", "add", "origin", remote_str.as_ref()])?;
    git(&seed, &["push", "origin", "main"])?;
    clone_repo(&remote, &local)?;

    Ok(RemotePair {
        temp_dir,
        remote,
        local,
    })
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

/// Writes a file, stages it and commits it
pub fn commit_file(repo_path: &Path, filename: &str, content: &str, message: &str) -> Result<()> {
    create_file(repo_path, filename, content)?;
    git(repo_path, &["add", filename])?;
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

pub fn push(repo_path: &Path, remote: &str, branch: &str) -> Result<()> {
    git(repo_path, &["push", remote, branch])?;
    Ok(())
}
