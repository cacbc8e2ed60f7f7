//! Implementation of a full node build.

use std::path::PathBuf;

use crate::core::{build_id, BuildResult, Platform};
use crate::ops::dispatch::dispatch;
use crate::ops::embed::{embed_build_id, embed_driver};
use crate::ops::fetch::fetch_driver;
use crate::util::config::BuildConfiguration;
use crate::util::lock::BuildLock;
use crate::util::process::CommandRunner;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Identifier embedded in the build
    pub build_id: String,
    /// Size of the embedded driver in bytes
    pub driver_size: usize,
}

/// Run every stage in order: build id, driver, platform pipeline.
///
/// Any failure aborts the remaining stages. Generated files written before
/// the failure are left in place.
pub fn build(
    config: &BuildConfiguration,
    runner: &mut dyn CommandRunner,
) -> BuildResult<BuildOutcome> {
    let _lock = BuildLock::acquire(&config.work_dir)?;

    let build_id = build_id::generate(config.platform);
    tracing::info!("Build id {}", build_id);
    embed_build_id(&config.project_root, &build_id)?;

    let driver = fetch_driver(config, runner)?;
    let driver_size = driver.len();
    embed_driver(&config.project_root, driver)?;

    dispatch(config, runner)?;

    tracing::info!("Finished {}", build_id);
    Ok(BuildOutcome {
        build_id,
        driver_size,
    })
}

/// Resolve the platform from `os`, read the configuration, and build.
///
/// An unsupported `os` fails before the lock, any generated file, or any
/// command is touched.
pub fn run_for_os<F>(
    os: &str,
    project_root: impl Into<PathBuf>,
    work_dir: impl Into<PathBuf>,
    lookup: F,
    runner: &mut dyn CommandRunner,
) -> BuildResult<BuildOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    let platform = Platform::from_os(os)?;
    let config = BuildConfiguration::from_lookup(platform, project_root, work_dir, lookup);
    build(&config, runner)
}

/// Build for the host platform using the process environment.
pub fn run_from_env(
    project_root: impl Into<PathBuf>,
    work_dir: impl Into<PathBuf>,
    runner: &mut dyn CommandRunner,
) -> BuildResult<BuildOutcome> {
    run_for_os(
        std::env::consts::OS,
        project_root,
        work_dir,
        |key| std::env::var(key).ok(),
        runner,
    )
}
