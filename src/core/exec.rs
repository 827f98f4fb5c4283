//! Subprocess execution with line-oriented output capture and a bounded wait.
//!
//! Every backend talks to its VCS tool through [`run`]. The child runs in the repository
//! directory with stdin closed, both output streams are drained on helper threads so a chatty
//! child can never block on a full pipe, and the parent polls for exit until the configured
//! deadline. An expired deadline kills the child and yields [`ReposError::Timeout`].

use crate::core::error::{ReposError, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Default bounded wait for a single subprocess call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Options applied to every subprocess a watch spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ExecOptions {
    /// Build options from a number of seconds, where 0 disables the wait bound
    pub fn from_secs(seconds: u64) -> Self {
        Self {
            timeout: (seconds > 0).then(|| Duration::from_secs(seconds)),
        }
    }
}

/// Captured result of a finished subprocess. Empty lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandOutput {
    /// Turn a nonzero exit into [`ReposError::Subprocess`]
    pub fn into_success(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ReposError::subprocess(self.command, self.code, &self.stderr))
        }
    }

    /// Stderr lines followed by stdout lines
    pub fn all_lines(&self) -> impl Iterator<Item = &String> {
        self.stderr.iter().chain(self.stdout.iter())
    }
}

/// Run `program args...` in `dir` and capture its output, regardless of the exit status.
pub fn run(program: &str, args: &[&str], dir: &Path, options: &ExecOptions) -> Result<CommandOutput> {
    let command = describe(program, args);
    log::debug!("exec [{}]: {}", dir.display(), command);

    let mut child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReposError::launch(&command, e))?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match wait(&mut child, options.timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            // Killing closes the pipes, which lets the drain threads finish.
            let _ = child.kill();
            let _ = child.wait();
            let seconds = options.timeout.map(|t| t.as_secs()).unwrap_or_default();
            log::warn!("exec [{}]: {} timed out after {}s", dir.display(), command, seconds);
            return Err(ReposError::timeout(command, seconds));
        }
        Err(e) => return Err(ReposError::launch(command, e)),
    };

    let stdout = collect(stdout);
    let stderr = collect(stderr);
    for line in &stderr {
        log::trace!(" err: {line}");
    }
    for line in &stdout {
        log::trace!(" out: {line}");
    }

    Ok(CommandOutput {
        command,
        success: status.success(),
        code: status.code(),
        stdout,
        stderr,
    })
}

/// Like [`run`], but a nonzero exit is an error
pub fn run_checked(program: &str, args: &[&str], dir: &Path, options: &ExecOptions) -> Result<CommandOutput> {
    run(program, args, dir, options)?.into_success()
}

fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `Ok(None)` when the deadline passed before the child exited
fn wait(child: &mut Child, timeout: Option<Duration>) -> std::io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<String> {
    let raw = handle.and_then(|h| h.join().ok()).unwrap_or_default();
    split_lines(&String::from_utf8_lossy(&raw))
}

/// Split captured output into its non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
