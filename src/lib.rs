//! Capstan - Locked-dependency export for poetry-managed Python services
//!
//! This crate provides the core library functionality for Capstan:
//! detecting poetry-managed services, exporting their locked dependencies
//! to requirements format, and staging the sanitized artifact for
//! packaging.

pub mod ops;
pub mod pyproject;
pub mod tool;
pub mod util;

/// Test utilities and mocks for Capstan unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted stand-in for the poetry CLI and
/// ready-made `pyproject.toml` fixtures.
#[cfg(test)]
pub mod test_support;

pub use ops::{export_requirements, ExportOptions, ExportOutcome, SkipReason};
pub use pyproject::PyProject;
pub use tool::{ExportError, ExportResult, ExportRunner, PoetryCli};
pub use util::Config;
