//! Testing utilities for the harness.
//!
//! This module provides:
//! - A scripted [`crate::process::CommandRunner`] double that records calls
//! - Fixture helpers for laying out a minimal project directory

mod fixtures;
mod mocks;

pub use fixtures::write_sketch;
pub use mocks::ScriptedRunner;

#[cfg(test)]
pub(crate) use fixtures::project_with_sketch;
