//! Unified color system for check results and sync outcomes.
//!
//! Every command colors classifications through this module so a given outcome looks the same
//! in `check`, `states` and `show`.
//!
//! # Color Scheme
//! - **Error / Fail**: Red
//! - **Local changes**: Yellow
//! - **Ahead**: Cyan (push pending)
//! - **Behind**: Magenta (pull pending)
//! - **Missing**: Bright black
//! - **Unchanged / Same**: Green

use crate::core::state::CheckResult;
use crate::core::watch::SyncOutcome;
use colored::*;

/// Color styling of a check result, applicable to any text
pub fn get_result_color_style(result: CheckResult) -> Box<dyn Fn(&str) -> ColoredString> {
    match result {
        CheckResult::Error => Box::new(|text: &str| text.red()),
        CheckResult::LocalChanges => Box::new(|text: &str| text.yellow()),
        CheckResult::Ahead => Box::new(|text: &str| text.cyan()),
        CheckResult::Behind => Box::new(|text: &str| text.magenta()),
        CheckResult::Unchanged => Box::new(|text: &str| text.green()),
    }
}

/// Color styling of a per-branch sync outcome, applicable to any text
pub fn get_outcome_color_style(outcome: SyncOutcome) -> Box<dyn Fn(&str) -> ColoredString> {
    match outcome {
        SyncOutcome::Same => Box::new(|text: &str| text.green()),
        SyncOutcome::Ahead => Box::new(|text: &str| text.cyan()),
        SyncOutcome::Behind => Box::new(|text: &str| text.magenta()),
        SyncOutcome::Missing => Box::new(|text: &str| text.bright_black()),
        SyncOutcome::Fail => Box::new(|text: &str| text.red().bold()),
    }
}

/// Outcome label padded to the widest label, then colored
pub fn get_aligned_outcome(outcome: SyncOutcome) -> ColoredString {
    let color_fn = get_outcome_color_style(outcome);
    color_fn(&format!("{:<7}", outcome.as_str()))
}

pub fn get_colored_result(result: CheckResult) -> ColoredString {
    let color_fn = get_result_color_style(result);
    color_fn(result.as_str())
}
