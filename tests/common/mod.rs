//! Consolidated test utilities for repos
//!
//! This module provides unified testing utilities for integration tests,
//! focused on real git repositories and local bare remotes.

pub mod assertions;
pub mod fixtures;
pub mod repository;
