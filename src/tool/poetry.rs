//! The real poetry CLI runner.

use std::io;
use std::path::Path;

use crate::util::process::ProcessBuilder;

use super::{ExportResult, ExportRunner};

/// Executable name of the poetry CLI.
pub const POETRY_PROGRAM: &str = "poetry";

/// Prefix marking a poetry build backend in `build-system.requires`.
pub const POETRY_BACKEND_PREFIX: &str = "poetry";

/// Where to point users when the executable is missing.
pub const POETRY_INSTALL_HINT: &str = "https://python-poetry.org/docs/#installation";

/// Arguments for a hash-free requirements-format export.
///
/// No output path is passed: depending on the poetry version the result
/// lands on stdout or in a `requirements.txt` next to the manifest.
pub const POETRY_EXPORT_ARGS: [&str; 4] = ["export", "--without-hashes", "-f", "requirements.txt"];

/// The poetry CLI, resolved through PATH at invocation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoetryCli;

impl PoetryCli {
    /// Create a runner for the system poetry.
    pub fn new() -> Self {
        PoetryCli
    }

    /// The full export command line, for log and error messages.
    pub fn display_command() -> String {
        ProcessBuilder::new(POETRY_PROGRAM)
            .args(POETRY_EXPORT_ARGS)
            .display_command()
    }
}

impl ExportRunner for PoetryCli {
    fn export(&self, project_dir: &Path) -> io::Result<ExportResult> {
        let output = ProcessBuilder::new(POETRY_PROGRAM)
            .args(POETRY_EXPORT_ARGS)
            .cwd(project_dir)
            .output()?;

        Ok(ExportResult::from_output(&output))
    }
}
