//! Locked-dependency export for poetry-managed services.
//!
//! Detects a poetry build backend in `pyproject.toml`, runs
//! `poetry export`, strips editable-install lines from the output, and
//! moves the resulting `requirements.txt` into the `.local-build` staging
//! directory for the downstream packaging step.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::pyproject::{PyProject, PYPROJECT_FILE};
use crate::tool::{
    ExportError, ExportRunner, PoetryCli, POETRY_BACKEND_PREFIX, POETRY_INSTALL_HINT,
    POETRY_PROGRAM,
};
use crate::util::fs::{ensure_dir, read_to_string, replace_file, write_string};

/// Directory under the service root where the artifact is staged.
pub const OUTPUT_DIR: &str = ".local-build";

/// Filename of the exported artifact, both as the working copy in the
/// service root and as the final file in the staging directory.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Whole lines marking editable installs (`-e <path>`), including the line
/// terminator.
static EDITABLE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^-e .*\n?").unwrap());

/// Options for a requirements export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Service directory expected to contain `pyproject.toml`.
    pub project_dir: PathBuf,

    /// Whether the export runs at all (opt-in).
    pub enabled: bool,
}

impl ExportOptions {
    /// Create options for the given service directory, export disabled.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        ExportOptions {
            project_dir: project_dir.into(),
            enabled: false,
        }
    }

    /// Set whether the export runs.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Why an export did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The opt-in flag is off.
    Disabled,

    /// No `pyproject.toml` in the service directory.
    ManifestMissing,

    /// The manifest declares no poetry build backend.
    BackendMismatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "requirements export is disabled"),
            SkipReason::ManifestMissing => write!(f, "no pyproject.toml found"),
            SkipReason::BackendMismatch => {
                write!(f, "pyproject.toml does not declare a poetry build backend")
            }
        }
    }
}

/// Result of a requirements export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// Preconditions unmet; nothing was run or written.
    Skipped {
        /// Which precondition failed.
        reason: SkipReason,
    },

    /// The artifact was staged.
    Exported {
        /// Final artifact path inside the staging directory.
        artifact: PathBuf,

        /// Editable-install lines dropped during sanitization.
        editable_lines_removed: usize,
    },
}

/// Export locked dependencies to the staging directory.
///
/// The pipeline is strictly linear: applicability check, tool run, output
/// sourcing, sanitization, move into [`OUTPUT_DIR`]. Any failure aborts
/// the whole call with no retry; non-applicability is a successful no-op.
///
/// Output sourcing tolerates both poetry behaviors: stdout is used when it
/// is non-empty after trimming, otherwise the `requirements.txt` the tool
/// wrote next to the manifest is read. Stdout always wins when both could
/// apply.
pub fn export_requirements(
    runner: &dyn ExportRunner,
    opts: &ExportOptions,
) -> Result<ExportOutcome> {
    if !opts.enabled {
        return Ok(ExportOutcome::Skipped {
            reason: SkipReason::Disabled,
        });
    }

    let manifest_path = opts.project_dir.join(PYPROJECT_FILE);
    if !manifest_path.exists() {
        return Ok(ExportOutcome::Skipped {
            reason: SkipReason::ManifestMissing,
        });
    }

    let manifest = PyProject::load(&manifest_path)?;
    if !manifest.declares_build_backend(POETRY_BACKEND_PREFIX) {
        return Ok(ExportOutcome::Skipped {
            reason: SkipReason::BackendMismatch,
        });
    }

    let capture = match runner.export(&opts.project_dir) {
        Ok(capture) => capture,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ExportError::ToolNotFound {
                tool: POETRY_PROGRAM,
                install_hint: POETRY_INSTALL_HINT,
            }
            .into());
        }
        Err(e) => {
            return Err(ExportError::LaunchFailure {
                tool: POETRY_PROGRAM,
                source: e,
            }
            .into());
        }
    };

    if !capture.success_status() {
        return Err(ExportError::ExportFailure {
            command: PoetryCli::display_command(),
            status: capture.status,
            stderr: capture.stderr,
        }
        .into());
    }

    let source_path = opts.project_dir.join(REQUIREMENTS_FILE);
    let from_stdout = !capture.stdout.trim().is_empty();
    let contents = if from_stdout {
        capture.stdout
    } else {
        read_to_string(&source_path)?
    };

    let (contents, removed) = strip_editable_lines(&contents);
    if removed > 0 {
        tracing::debug!(
            "requirements contain {} editable install line(s), removing them",
            removed
        );
    }

    // The move below needs a concrete file at the source path. Stdout
    // output is materialized there; a tool-written file is rewritten only
    // when sanitization changed it.
    if from_stdout || removed > 0 {
        write_string(&source_path, &contents)?;
    }

    let staging_dir = opts.project_dir.join(OUTPUT_DIR);
    ensure_dir(&staging_dir)?;

    let artifact = staging_dir.join(REQUIREMENTS_FILE);
    replace_file(&source_path, &artifact)?;

    Ok(ExportOutcome::Exported {
        artifact,
        editable_lines_removed: removed,
    })
}

/// Remove editable-install lines, returning the cleaned text and the
/// number of lines dropped.
fn strip_editable_lines(text: &str) -> (String, usize) {
    let removed = EDITABLE_LINE.find_iter(text).count();
    if removed == 0 {
        (text.to_string(), 0)
    } else {
        (EDITABLE_LINE.replace_all(text, "").into_owned(), removed)
    }
}
