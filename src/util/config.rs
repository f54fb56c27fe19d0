//! Configuration file support for Capstan.
//!
//! Capstan reads two configuration file locations:
//! - Global: `~/.capstan/config.toml` - user-wide defaults
//! - Project: `<service>/.capstan/config.toml` - per-service settings
//!
//! The opt-in export flag merges as an OR across the two layers: either
//! file can turn it on, and a project file cannot switch off a globally
//! enabled export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Capstan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Python packaging settings
    pub python: PythonConfig,
}

/// Python packaging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Export locked dependencies through poetry (opt-in, default off)
    #[serde(default)]
    pub use_poetry: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Opt-in flag merges as an OR: a project cannot switch off a
        // globally enabled export
        if other.python.use_poetry {
            self.python.use_poetry = true;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// The global config (~/.capstan/config.toml) is applied first, then the
/// project config (.capstan/config.toml). Merging is an OR on the opt-in
/// flag, so either layer can enable the export.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global capstan config directory (~/.capstan).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".capstan"))
}

/// Get the global config path (~/.capstan/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (<service>/.capstan/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".capstan").join("config.toml")
}
