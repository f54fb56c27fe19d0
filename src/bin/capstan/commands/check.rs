//! `capstan check` command

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::CheckArgs;
use capstan::pyproject::{PyProject, PYPROJECT_FILE};
use capstan::tool::POETRY_BACKEND_PREFIX;
use capstan::util::config::{global_config_path, load_config, project_config_path};

/// What `check` found out about a service directory.
#[derive(Debug, Serialize)]
struct CheckReport {
    /// Whether `pyproject.toml` exists.
    manifest_found: bool,

    /// Whether the manifest declares a poetry build backend.
    applicable: bool,

    /// The `build-system.requires` entry that matched.
    matched_requirement: Option<String>,

    /// The declared `build-system.build-backend`, if any.
    build_backend: Option<String>,

    /// Whether configuration enables the export.
    export_enabled: bool,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let project_dir = args.path.unwrap_or_else(|| PathBuf::from("."));
    if !project_dir.is_dir() {
        bail!("service directory not found: {}", project_dir.display());
    }

    let global_path = global_config_path().unwrap_or_default();
    let config = load_config(&global_path, &project_config_path(&project_dir));

    let manifest_path = project_dir.join(PYPROJECT_FILE);
    let report = if manifest_path.exists() {
        let manifest = PyProject::load(&manifest_path)?;
        let matched = manifest
            .matching_requirement(POETRY_BACKEND_PREFIX)
            .map(str::to_string);

        CheckReport {
            manifest_found: true,
            applicable: matched.is_some(),
            matched_requirement: matched,
            build_backend: manifest.build_system.build_backend.clone(),
            export_enabled: config.python.use_poetry,
        }
    } else {
        CheckReport {
            manifest_found: false,
            applicable: false,
            matched_requirement: None,
            build_backend: None,
            export_enabled: config.python.use_poetry,
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.applicable {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &CheckReport) {
    let yes_no = |v: bool| if v { "yes" } else { "no" };

    println!(
        "manifest:       {}",
        if report.manifest_found {
            "found"
        } else {
            "missing"
        }
    );
    println!(
        "backend:        {}",
        report.build_backend.as_deref().unwrap_or("-")
    );
    println!(
        "requirement:    {}",
        report.matched_requirement.as_deref().unwrap_or("-")
    );
    println!("export enabled: {}", yes_no(report.export_enabled));
    println!("applicable:     {}", yes_no(report.applicable));
}
