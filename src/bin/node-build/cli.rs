//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// Embed the build id and record/replay driver, then build node
#[derive(Parser)]
#[command(name = "node-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Root of the node checkout (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub project_root: Option<PathBuf>,
}
