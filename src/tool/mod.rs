//! Lock-tool invocation contract.
//!
//! The export pipeline talks to the external dependency-lock tool through
//! the [`ExportRunner`] trait, so tests can substitute a scripted runner
//! for the real `poetry` binary.

use std::io;
use std::path::Path;

use thiserror::Error;

pub mod poetry;

pub use poetry::{PoetryCli, POETRY_BACKEND_PREFIX, POETRY_INSTALL_HINT, POETRY_PROGRAM};

/// Captured outcome of one run of the external export tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

impl ExportResult {
    /// A successful run with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        ExportResult {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        ExportResult {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Build from captured process output.
    pub fn from_output(output: &std::process::Output) -> Self {
        ExportResult {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Whether the tool exited with status 0.
    pub fn success_status(&self) -> bool {
        self.status == Some(0)
    }
}

/// Terminal failures of one export invocation.
///
/// Every variant aborts the whole operation; there is no retry and no
/// fallback. Non-applicability is not an error and never reaches this type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The tool executable is not on the search path.
    #[error("`{tool}` not found; install it from {install_hint}")]
    ToolNotFound {
        tool: &'static str,
        install_hint: &'static str,
    },

    /// The tool exists but could not be launched.
    #[error("failed to launch `{tool}`")]
    LaunchFailure {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    /// The tool ran but exited nonzero; stderr is carried verbatim.
    #[error("`{command}` failed with exit code {status:?}\n{stderr}")]
    ExportFailure {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

/// Runs the lock tool's export command.
///
/// Implementations execute in the given working directory and capture the
/// process output. Launch problems surface as the raw [`io::Error`] so the
/// caller can tell a missing executable apart from other spawn failures.
pub trait ExportRunner {
    /// Run the export command in `project_dir` and capture its output.
    fn export(&self, project_dir: &Path) -> io::Result<ExportResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_result_success() {
        let result = ExportResult::success("pkg==1.0\n");

        assert!(result.success_status());
        assert_eq!(result.stdout, "pkg==1.0\n");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn test_export_result_failure() {
        let result = ExportResult::failure(1, "resolution failed");

        assert!(!result.success_status());
        assert_eq!(result.status, Some(1));
        assert_eq!(result.stderr, "resolution failed");
    }

    #[test]
    fn test_signal_termination_is_not_success() {
        let result = ExportResult {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        };

        assert!(!result.success_status());
    }

    #[test]
    fn test_from_output() {
        let output = std::process::Command::new("echo")
            .arg("hi")
            .output()
            .unwrap();

        let result = ExportResult::from_output(&output);
        assert!(result.success_status());
        assert!(result.stdout.contains("hi"));
    }

    #[test]
    fn test_tool_not_found_message_names_tool_and_hint() {
        let err = ExportError::ToolNotFound {
            tool: "poetry",
            install_hint: "https://python-poetry.org/docs/#installation",
        };

        let message = err.to_string();
        assert!(message.contains("poetry"));
        assert!(message.contains("install"));
    }

    #[test]
    fn test_export_failure_message_carries_stderr() {
        let err = ExportError::ExportFailure {
            command: "poetry export".to_string(),
            status: Some(1),
            stderr: "resolution failed".to_string(),
        };

        assert!(err.to_string().contains("resolution failed"));
    }
}
