//! Concurrent check of many repositories.
//!
//! [`Checker::run`] feeds the records into a job channel drained by a bounded pool of worker
//! threads. Each worker classifies one repository at a time (see [`classify`]) and files the
//! result into a shared [`Tally`] guarded by a single mutex, which also owns the completion
//! counter. After every file-in, a [`ProgressEvent`] goes to the optional progress channel; its
//! consumer never touches the tally. Once all workers have joined, buckets are put back into
//! input order so the report does not depend on completion order.
//!
//! Classification priority: Error > LocalChanges > Ahead > Behind > Unchanged.

use crate::core::{
    config::CheckConfig,
    state::{CheckEntry, CheckReport, CheckResult, RepoRecord},
    watch::SyncOutcome,
};
use chrono::Utc;
use crossbeam::channel::{self, Sender};
use std::sync::Mutex;
use std::thread;

/// Emitted once per completed repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub name: String,
    pub result: CheckResult,
    pub completed: usize,
    pub total: usize,
}

pub struct Checker {
    config: CheckConfig,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// Evaluate every record and aggregate the outcomes.
    ///
    /// `progress` is dropped when this returns, which ends the consumer's receive loop.
    pub fn run(&self, records: Vec<RepoRecord>, progress: Option<Sender<ProgressEvent>>) -> CheckReport {
        let started_at = Utc::now();
        let total = records.len();
        let workers = self.config.workers.clamp(1, total.max(1));
        log::info!("Checking {total} repos with {workers} workers");

        let (jobs, queue) = channel::unbounded::<(usize, RepoRecord)>();
        for job in records.into_iter().enumerate() {
            // The receiver is alive in this scope, so sending cannot fail.
            let _ = jobs.send(job);
        }
        drop(jobs);

        let tally = Mutex::new(Tally::default());
        thread::scope(|scope| {
            for _ in 0..workers {
                let queue = queue.clone();
                let tally = &tally;
                let progress = progress.clone();
                scope.spawn(move || {
                    for (index, record) in queue.iter() {
                        log::debug!("Checking repo {}", record.name);
                        let entry = classify(&record);
                        let name = entry.name.clone();
                        let result = entry.result;

                        let completed = {
                            let mut tally = tally.lock().unwrap_or_else(|e| e.into_inner());
                            tally.file(index, entry)
                        };
                        log::debug!("Done: Repo {name} {result} ({completed} of {total})");

                        if let Some(progress) = &progress {
                            let _ = progress.send(ProgressEvent {
                                name,
                                result,
                                completed,
                                total,
                            });
                        }
                    }
                });
            }
        });

        let tally = tally.into_inner().unwrap_or_else(|e| e.into_inner());
        tally.into_report(total, started_at)
    }
}

/// Classify one repository into exactly one [`CheckResult`]
pub fn classify(record: &RepoRecord) -> CheckEntry {
    let (result, error) = evaluate(record);
    CheckEntry {
        name: record.name.clone(),
        path: record.path.clone(),
        kind: record.kind.clone(),
        result,
        error,
    }
}

fn evaluate(record: &RepoRecord) -> (CheckResult, Option<String>) {
    if let Some(error) = &record.error {
        return (CheckResult::Error, Some(error.clone()));
    }
    let Some(watch) = &record.watch else {
        return (CheckResult::Error, Some("repository has no watch".to_string()));
    };

    match watch.changes() {
        Err(e) => return (CheckResult::Error, Some(e.to_string())),
        Ok(true) => return (CheckResult::LocalChanges, None),
        Ok(false) => {}
    }

    match watch.synced() {
        Err(e) => (CheckResult::Error, Some(e.to_string())),
        Ok(SyncOutcome::Ahead) => (CheckResult::Ahead, None),
        Ok(SyncOutcome::Behind) => (CheckResult::Behind, None),
        Ok(SyncOutcome::Fail) => (
            CheckResult::Error,
            Some("sync state could not be determined".to_string()),
        ),
        Ok(SyncOutcome::Same | SyncOutcome::Missing) => (CheckResult::Unchanged, None),
    }
}

/// Shared aggregation state: the four buckets and the completion counter
#[derive(Debug, Default)]
struct Tally {
    errors: Vec<(usize, CheckEntry)>,
    local_changes: Vec<(usize, CheckEntry)>,
    ahead: Vec<(usize, CheckEntry)>,
    behind: Vec<(usize, CheckEntry)>,
    unchanged: usize,
    completed: usize,
}

impl Tally {
    /// Returns the number of completed repos including this one
    fn file(&mut self, index: usize, entry: CheckEntry) -> usize {
        match entry.result {
            CheckResult::Error => self.errors.push((index, entry)),
            CheckResult::LocalChanges => self.local_changes.push((index, entry)),
            CheckResult::Ahead => self.ahead.push((index, entry)),
            CheckResult::Behind => self.behind.push((index, entry)),
            CheckResult::Unchanged => self.unchanged += 1,
        }
        self.completed += 1;
        self.completed
    }

    fn into_report(self, total: usize, started_at: chrono::DateTime<Utc>) -> CheckReport {
        CheckReport {
            errors: in_input_order(self.errors),
            local_changes: in_input_order(self.local_changes),
            ahead: in_input_order(self.ahead),
            behind: in_input_order(self.behind),
            unchanged: self.unchanged,
            total,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

fn in_input_order(mut bucket: Vec<(usize, CheckEntry)>) -> Vec<CheckEntry> {
    bucket.sort_by_key(|(index, _)| *index);
    bucket.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{ReposError, Result};
    use crate::core::watch::{BranchRemoteState, RepoWatch};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    /// Scripted watch; `delay` staggers completion order
    struct ScriptedWatch {
        name: String,
        path: PathBuf,
        changes: std::result::Result<bool, String>,
        synced: std::result::Result<SyncOutcome, String>,
        delay: Duration,
    }

    impl RepoWatch for ScriptedWatch {
        fn changes(&self) -> Result<bool> {
            thread::sleep(self.delay);
            self.changes
                .clone()
                .map_err(|e| ReposError::parse_ambiguity(&self.path, e))
        }
        fn remotes(&self) -> Result<Vec<String>> {
            Ok(vec!["origin".to_string()])
        }
        fn synced(&self) -> Result<SyncOutcome> {
            self.synced
                .clone()
                .map_err(|e| ReposError::parse_ambiguity(&self.path, e))
        }
        fn states(&self) -> Result<Vec<BranchRemoteState>> {
            Ok(Vec::new())
        }
        fn kind(&self) -> &'static str {
            "Scripted"
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn path(&self) -> &Path {
            &self.path
        }
    }

    fn record(
        name: &str,
        changes: std::result::Result<bool, String>,
        synced: std::result::Result<SyncOutcome, String>,
        delay_ms: u64,
    ) -> RepoRecord {
        let path = PathBuf::from(format!("/work/{name}"));
        let watch = ScriptedWatch {
            name: name.to_string(),
            path: path.clone(),
            changes,
            synced,
            delay: Duration::from_millis(delay_ms),
        };
        RepoRecord::watched(name, path, Box::new(watch))
    }

    fn names(entries: &[CheckEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_classification_priority() {
        let broken = RepoRecord::broken("broken", "/work/broken", "gone");
        assert_eq!(classify(&broken).result, CheckResult::Error);
        assert_eq!(classify(&broken).error.as_deref(), Some("gone"));

        // Local changes win over divergence, which is never even asked for.
        let dirty_ahead = record("a", Ok(true), Ok(SyncOutcome::Ahead), 0);
        assert_eq!(classify(&dirty_ahead).result, CheckResult::LocalChanges);

        let failing = record("b", Err("status failed".into()), Ok(SyncOutcome::Same), 0);
        let entry = classify(&failing);
        assert_eq!(entry.result, CheckResult::Error);
        assert!(entry.error.unwrap().contains("status failed"));

        let fetch_failed = record("c", Ok(false), Err("fetch failed".into()), 0);
        assert_eq!(classify(&fetch_failed).result, CheckResult::Error);

        assert_eq!(
            classify(&record("d", Ok(false), Ok(SyncOutcome::Ahead), 0)).result,
            CheckResult::Ahead
        );
        assert_eq!(
            classify(&record("e", Ok(false), Ok(SyncOutcome::Behind), 0)).result,
            CheckResult::Behind
        );
        assert_eq!(
            classify(&record("f", Ok(false), Ok(SyncOutcome::Same), 0)).result,
            CheckResult::Unchanged
        );
        assert_eq!(
            classify(&record("g", Ok(false), Ok(SyncOutcome::Fail), 0)).result,
            CheckResult::Error
        );
    }

    #[test]
    fn test_run_buckets_in_input_order() {
        let records = vec![
            record("slow-dirty", Ok(true), Ok(SyncOutcome::Same), 60),
            record("clean", Ok(false), Ok(SyncOutcome::Same), 0),
            record("fast-dirty", Ok(true), Ok(SyncOutcome::Same), 0),
            record("ahead", Ok(false), Ok(SyncOutcome::Ahead), 10),
            record("behind", Ok(false), Ok(SyncOutcome::Behind), 0),
            RepoRecord::broken("gone", "/work/gone", "No implementation found to watch /work/gone"),
        ];
        let report = Checker::new(CheckConfig { workers: 4 }).run(records, None);

        assert_eq!(report.total, 6);
        assert_eq!(report.unchanged, 1);
        assert_eq!(names(&report.errors), vec!["gone"]);
        assert_eq!(names(&report.local_changes), vec!["slow-dirty", "fast-dirty"]);
        assert_eq!(names(&report.ahead), vec!["ahead"]);
        assert_eq!(names(&report.behind), vec!["behind"]);
        assert!(report.errors[0].error.is_some());
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_run_reports_progress_once_per_repo() {
        let records: Vec<_> = (0..10)
            .map(|i| record(&format!("repo{i}"), Ok(false), Ok(SyncOutcome::Same), 5))
            .collect();
        let (tx, rx) = channel::unbounded();

        let consumer = thread::spawn(move || rx.iter().collect::<Vec<ProgressEvent>>());
        let report = Checker::new(CheckConfig { workers: 3 }).run(records, Some(tx));
        let events = consumer.join().unwrap();

        assert!(report.all_in_sync());
        assert_eq!(report.unchanged, 10);
        assert_eq!(events.len(), 10);
        assert!(events.iter().all(|e| e.total == 10));
        let mut completed: Vec<_> = events.iter().map(|e| e.completed).collect();
        completed.sort_unstable();
        assert_eq!(completed, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_without_records() {
        let report = Checker::new(CheckConfig::default()).run(Vec::new(), None);
        assert_eq!(report.total, 0);
        assert!(report.all_in_sync());
    }

    #[test]
    fn test_single_worker_still_checks_everything() {
        let records = vec![
            record("a", Ok(true), Ok(SyncOutcome::Same), 0),
            record("b", Ok(false), Ok(SyncOutcome::Behind), 0),
        ];
        let report = Checker::new(CheckConfig { workers: 1 }).run(records, None);
        assert_eq!(names(&report.local_changes), vec!["a"]);
        assert_eq!(names(&report.behind), vec!["b"]);
    }
}
