//! node-build CLI - build orchestration for the record/replay Node runtime

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use node_build::SystemRunner;

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("node_build=debug")
        } else {
            EnvFilter::new("node_build=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let project_root = match cli.project_root {
        Some(root) => root
            .canonicalize()
            .with_context(|| format!("project root {} not found", root.display()))?,
        None => cwd.clone(),
    };

    node_build::run_from_env(project_root, cwd, &mut SystemRunner)?;

    Ok(())
}
