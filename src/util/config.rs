//! Build configuration.
//!
//! Everything the pipeline needs from the environment is read once, here, into
//! a [`BuildConfiguration`]. Later stages take the configuration by reference
//! and never consult the process environment themselves.

use std::path::{Path, PathBuf};

use crate::core::Platform;

/// Enables the container image build on Linux.
pub const ENV_BUILD_CONTAINER: &str = "BUILD_NODE_CONTAINER";

/// Enables the `configure` step on macOS.
pub const ENV_CONFIGURE: &str = "CONFIGURE_NODE";

/// Overrides the base URL the driver is downloaded from.
pub const ENV_DRIVER_URL: &str = "NODE_BUILD_DRIVER_URL";

/// Selects the download tool (`wget` or `http`).
pub const ENV_DOWNLOADER: &str = "NODE_BUILD_DOWNLOADER";

/// Default location of the record/replay drivers.
pub const DEFAULT_DRIVER_BASE_URL: &str = "https://replay.io/downloads";

/// How the driver artifact is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadTool {
    /// Shell out to `wget`.
    #[default]
    Wget,
    /// Fetch in-process over HTTP.
    Http,
}

impl std::str::FromStr for DownloadTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wget" => Ok(DownloadTool::Wget),
            "http" => Ok(DownloadTool::Http),
            _ => Err(format!(
                "invalid downloader '{}'; expected 'wget' or 'http'",
                s
            )),
        }
    }
}

/// Read-only settings for a single build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Host platform
    pub platform: Platform,

    /// Root of the Node source tree
    pub project_root: PathBuf,

    /// Directory the driver is downloaded into
    pub work_dir: PathBuf,

    /// Build the container image before running the containerized build
    pub run_container_build: bool,

    /// Run `configure` before `make`
    pub run_configure_step: bool,

    /// Parallel job count handed to `make`
    pub jobs: usize,

    /// Base URL for driver downloads (no trailing slash)
    pub driver_base_url: String,

    /// Tool used to fetch the driver
    pub download_tool: DownloadTool,
}

impl BuildConfiguration {
    /// Create a configuration with every optional step disabled.
    pub fn new(platform: Platform, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        BuildConfiguration {
            platform,
            work_dir: project_root.clone(),
            project_root,
            run_container_build: false,
            run_configure_step: false,
            jobs: num_cpus::get(),
            driver_base_url: DEFAULT_DRIVER_BASE_URL.to_string(),
            download_tool: DownloadTool::default(),
        }
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(
        platform: Platform,
        project_root: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(platform, project_root).with_work_dir(work_dir);

        config.run_container_build = is_truthy(lookup(ENV_BUILD_CONTAINER));
        config.run_configure_step = is_truthy(lookup(ENV_CONFIGURE));

        if let Some(url) = lookup(ENV_DRIVER_URL).filter(|u| !u.is_empty()) {
            config.driver_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(tool) = lookup(ENV_DOWNLOADER).filter(|t| !t.is_empty()) {
            config.download_tool = tool.parse().unwrap_or_else(|e: String| {
                tracing::warn!("{}; using wget", e);
                DownloadTool::Wget
            });
        }

        tracing::debug!(?config, "build configuration");
        config
    }

    /// Override the download directory.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Override the parallel job count.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Path of a file relative to the project root.
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(relative)
    }
}

/// A flag counts as set when the variable exists and is non-empty.
fn is_truthy(value: Option<String>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config =
            BuildConfiguration::from_lookup(Platform::Linux, "/node", "/work", lookup_from(&[]));

        assert!(!config.run_container_build);
        assert!(!config.run_configure_step);
        assert_eq!(config.project_root, PathBuf::from("/node"));
        assert_eq!(config.work_dir, PathBuf::from("/work"));
        assert_eq!(config.driver_base_url, DEFAULT_DRIVER_BASE_URL);
        assert_eq!(config.download_tool, DownloadTool::Wget);
        assert!(config.jobs >= 1);
    }

    #[test]
    fn test_flags_enabled_by_presence() {
        let config = BuildConfiguration::from_lookup(
            Platform::MacOs,
            "/node",
            "/node",
            lookup_from(&[(ENV_BUILD_CONTAINER, "1"), (ENV_CONFIGURE, "yes")]),
        );

        assert!(config.run_container_build);
        assert!(config.run_configure_step);
    }

    #[test]
    fn test_empty_flag_is_unset() {
        let config = BuildConfiguration::from_lookup(
            Platform::Linux,
            "/node",
            "/node",
            lookup_from(&[(ENV_BUILD_CONTAINER, "")]),
        );

        assert!(!config.run_container_build);
    }

    #[test]
    fn test_driver_url_and_downloader_overrides() {
        let config = BuildConfiguration::from_lookup(
            Platform::Linux,
            "/node",
            "/node",
            lookup_from(&[
                (ENV_DRIVER_URL, "http://127.0.0.1:8080/drivers/"),
                (ENV_DOWNLOADER, "HTTP"),
            ]),
        );

        assert_eq!(config.driver_base_url, "http://127.0.0.1:8080/drivers");
        assert_eq!(config.download_tool, DownloadTool::Http);
    }

    #[test]
    fn test_unknown_downloader_falls_back_to_wget() {
        let config = BuildConfiguration::from_lookup(
            Platform::Linux,
            "/node",
            "/node",
            lookup_from(&[(ENV_DOWNLOADER, "curl")]),
        );

        assert_eq!(config.download_tool, DownloadTool::Wget);
    }

    #[test]
    fn test_with_jobs() {
        let config = BuildConfiguration::new(Platform::MacOs, "/node").with_jobs(8);
        assert_eq!(config.jobs, 8);
        assert_eq!(config.project_path("configure"), PathBuf::from("/node/configure"));
    }
}
