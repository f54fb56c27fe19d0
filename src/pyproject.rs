//! `pyproject.toml` parsing and build-system schema.
//!
//! Only the PEP 518 `[build-system]` table matters for detection; project
//! metadata and tool tables in the file are ignored.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Manifest filename expected at the root of a service directory.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Parsed view of a `pyproject.toml` manifest.
///
/// Constructed fresh from disk for each detection decision; never cached.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PyProject {
    /// The `[build-system]` table. A missing table is an empty one.
    #[serde(default, rename = "build-system")]
    pub build_system: BuildSystem,
}

/// The `[build-system]` table of a `pyproject.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSystem {
    /// Build requirements, e.g. `["poetry-core>=1.0"]`. A missing field is
    /// an empty list.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Declared build backend, e.g. `"poetry.core.masonry.api"`.
    #[serde(default, rename = "build-backend")]
    pub build_backend: Option<String>,
}

impl PyProject {
    /// Load and parse a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse a manifest from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// First `build-system.requires` entry starting with `prefix`.
    ///
    /// The match is case-sensitive and deliberately loose: a prefix of
    /// `"poetry"` matches both `"poetry>=1.0"` and `"poetry-core>=1.0"`.
    pub fn matching_requirement(&self, prefix: &str) -> Option<&str> {
        self.build_system
            .requires
            .iter()
            .map(String::as_str)
            .find(|req| req.starts_with(prefix))
    }

    /// Whether any `build-system.requires` entry starts with `prefix`.
    pub fn declares_build_backend(&self, prefix: &str) -> bool {
        self.matching_requirement(prefix).is_some()
    }
}
