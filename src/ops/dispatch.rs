//! Platform build pipelines.
//!
//! Linux builds run inside a container so the result links against a known
//! glibc. Everywhere else the tree is built natively with `make`.

use crate::core::{BuildResult, Platform};
use crate::util::config::BuildConfiguration;
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Tag of the container image used for Linux builds.
pub const BUILD_IMAGE: &str = "node-build";

/// Container build definition, relative to the project root.
pub const BUILD_DEFINITION: &str = "Dockerfile.build";

/// Mount point of the project root inside the build container.
pub const CONTAINER_MOUNT: &str = "/node";

/// The ordered commands the pipeline for `config.platform` runs.
pub fn pipeline(config: &BuildConfiguration) -> Vec<ProcessBuilder> {
    match config.platform {
        Platform::Linux => linux_pipeline(config),
        Platform::MacOs => native_pipeline(config),
    }
}

fn linux_pipeline(config: &BuildConfiguration) -> Vec<ProcessBuilder> {
    let root = &config.project_root;
    let mut steps = Vec::new();

    if config.run_container_build {
        steps.push(
            ProcessBuilder::new("docker")
                .arg("build")
                .arg(root)
                .arg("-f")
                .arg(config.project_path(BUILD_DEFINITION))
                .args(["-t", BUILD_IMAGE]),
        );
    }

    steps.push(
        ProcessBuilder::new("docker")
            .arg("run")
            .arg("-v")
            .arg(format!("{}:{}", root.display(), CONTAINER_MOUNT))
            .arg(BUILD_IMAGE),
    );

    steps
}

fn native_pipeline(config: &BuildConfiguration) -> Vec<ProcessBuilder> {
    let root = &config.project_root;
    let mut steps = Vec::new();

    if config.run_configure_step {
        steps.push(ProcessBuilder::new(config.project_path("configure")).cwd(root));
    }

    steps.push(
        ProcessBuilder::new("make")
            .arg(format!("-j{}", config.jobs))
            .args(["-C", "out", "BUILDTYPE=Release"])
            .cwd(root),
    );

    steps
}

/// Run the build pipeline for the configured platform, stopping at the first failure.
pub fn dispatch(config: &BuildConfiguration, runner: &mut dyn CommandRunner) -> BuildResult<()> {
    let steps = pipeline(config);
    tracing::info!(
        "Building for {} ({} step{})",
        config.platform,
        steps.len(),
        if steps.len() == 1 { "" } else { "s" }
    );

    for step in &steps {
        runner.run(step)?;
    }

    Ok(())
}
