//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Capstan - Locked-dependency export for poetry-managed Python services
#[derive(Parser)]
#[command(name = "capstan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export locked dependencies to .local-build/requirements.txt
    Export(ExportArgs),

    /// Report whether a service qualifies for the export
    Check(CheckArgs),

    /// Check that the tools the export relies on are available
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Service directory containing pyproject.toml (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Run the export even when configuration leaves it disabled
    #[arg(long)]
    pub use_poetry: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Service directory containing pyproject.toml (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
