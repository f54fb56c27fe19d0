//! Test utilities and mocks for Capstan unit tests.
//!
//! The export pipeline shells out to poetry; these helpers let tests
//! script the tool's behavior instead of requiring a real installation.
//!
//! # Example
//!
//! ```rust,ignore
//! use capstan::test_support::{poetry_pyproject, ScriptedRunner};
//! use capstan::tool::ExportResult;
//!
//! let runner = ScriptedRunner::new().respond(ExportResult::success("pkg==1.0\n"));
//! // Pass `&runner` wherever an `ExportRunner` is expected...
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use crate::tool::{ExportResult, ExportRunner};

/// Scripted stand-in for the poetry CLI.
///
/// Responses are consumed in order, one per `export` call; running out of
/// responses panics the test. Invocations are recorded so tests can assert
/// whether and where the tool was run.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<io::Result<ExportResult>>>,
    calls: RefCell<Vec<PathBuf>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        ScriptedRunner::default()
    }

    /// Queue a captured tool outcome for the next call.
    pub fn respond(self, result: ExportResult) -> Self {
        self.responses.borrow_mut().push_back(Ok(result));
        self
    }

    /// Queue a spawn failure of the given kind for the next call.
    pub fn respond_launch_error(self, kind: io::ErrorKind) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(io::Error::new(kind, "scripted launch error")));
        self
    }

    /// Working directories of all recorded invocations.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl ExportRunner for ScriptedRunner {
    fn export(&self, project_dir: &Path) -> io::Result<ExportResult> {
        self.calls.borrow_mut().push(project_dir.to_path_buf());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected export invocation in {}", project_dir.display()))
    }
}

/// Manifest for a poetry-managed service.
pub fn poetry_pyproject() -> String {
    r#"[tool.poetry]
name = "svc"
version = "0.1.0"
description = ""
authors = ["dev <dev@example.com>"]

[tool.poetry.dependencies]
python = "^3.11"

[build-system]
requires = ["poetry-core>=1.0.0"]
build-backend = "poetry.core.masonry.api"
"#
    .to_string()
}

/// Manifest for a service using a non-poetry build backend.
pub fn setuptools_pyproject() -> String {
    r#"[project]
name = "svc"
version = "0.1.0"

[build-system]
requires = ["setuptools>=68", "wheel"]
build-backend = "setuptools.build_meta"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_runner_replays_in_order() {
        let runner = ScriptedRunner::new()
            .respond(ExportResult::success("a==1\n"))
            .respond(ExportResult::failure(2, "boom"));

        let first = runner.export(Path::new("/svc")).unwrap();
        assert_eq!(first.stdout, "a==1\n");

        let second = runner.export(Path::new("/svc")).unwrap();
        assert_eq!(second.status, Some(2));

        assert_eq!(
            runner.calls(),
            vec![PathBuf::from("/svc"), PathBuf::from("/svc")]
        );
    }

    #[test]
    fn test_scripted_runner_launch_error_kind() {
        let runner = ScriptedRunner::new().respond_launch_error(io::ErrorKind::NotFound);

        let err = runner.export(Path::new("/svc")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    #[should_panic(expected = "unexpected export invocation")]
    fn test_scripted_runner_panics_when_exhausted() {
        let runner = ScriptedRunner::new();
        let _ = runner.export(Path::new("/svc"));
    }

    #[test]
    fn test_fixture_manifests_parse() {
        let poetry: toml::Value = toml::from_str(&poetry_pyproject()).unwrap();
        assert!(poetry.get("build-system").is_some());

        let setuptools: toml::Value = toml::from_str(&setuptools_pyproject()).unwrap();
        assert!(setuptools.get("build-system").is_some());
    }
}
