//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating repos command output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the common error prefix
pub fn is_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

/// Creates a predicate that checks for a report section headline
pub fn has_section(title: &str) -> impl Predicate<str> {
    predicates::str::contains("Found").and(predicates::str::contains(title.to_string()))
}

/// Creates a predicate that checks for the all-in-sync summary
pub fn all_in_sync() -> impl Predicate<str> {
    predicates::str::contains("All is in sync!")
}

/// Creates a predicate that checks a watch is listed with its type
pub fn lists_watch(name: &str, kind: &str) -> impl Predicate<str> {
    predicates::str::contains(name.to_string()).and(predicates::str::contains(kind.to_string()))
}
