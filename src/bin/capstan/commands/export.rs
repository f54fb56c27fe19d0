//! `capstan export` command

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::ExportArgs;
use capstan::ops::{export_requirements, ExportOptions, ExportOutcome};
use capstan::tool::PoetryCli;
use capstan::util::config::{global_config_path, load_config, project_config_path};

pub fn execute(args: ExportArgs) -> Result<()> {
    let project_dir = args.path.unwrap_or_else(|| PathBuf::from("."));
    if !project_dir.is_dir() {
        bail!("service directory not found: {}", project_dir.display());
    }

    // Load configuration (global + project)
    let global_path = global_config_path().unwrap_or_default();
    let config = load_config(&global_path, &project_config_path(&project_dir));

    // The CLI flag forces the export on; it never switches it off
    let enabled = args.use_poetry || config.python.use_poetry;

    let opts = ExportOptions::new(&project_dir).with_enabled(enabled);
    let outcome = export_requirements(&PoetryCli::new(), &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        ExportOutcome::Exported {
            artifact,
            editable_lines_removed,
        } => {
            eprintln!("    Exported {}", artifact.display());
            if *editable_lines_removed > 0 {
                eprintln!(
                    "     Removed {} editable install line(s)",
                    editable_lines_removed
                );
            }
        }
        ExportOutcome::Skipped { reason } => {
            eprintln!("     Skipped {}", reason);
        }
    }

    Ok(())
}
