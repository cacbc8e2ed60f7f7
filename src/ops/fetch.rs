//! Record/replay driver download.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{BuildError, BuildResult, Platform};
use crate::util::config::{BuildConfiguration, DownloadTool};
use crate::util::fs::remove_file_if_exists;
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Name of the driver artifact for `platform`.
pub fn driver_file_name(platform: Platform) -> String {
    format!("{}-recordreplay.so", platform.tag())
}

/// Download URL of the driver for the configured platform.
pub fn driver_url(config: &BuildConfiguration) -> String {
    format!(
        "{}/{}",
        config.driver_base_url,
        driver_file_name(config.platform)
    )
}

/// A downloaded artifact on disk, removed when dropped.
#[derive(Debug)]
struct DownloadedArtifact {
    path: PathBuf,
    removed: bool,
}

impl DownloadedArtifact {
    fn new(path: PathBuf) -> Self {
        DownloadedArtifact {
            path,
            removed: false,
        }
    }

    fn remove(mut self) -> BuildResult<()> {
        self.removed = true;
        remove_file_if_exists(&self.path)
    }
}

impl Drop for DownloadedArtifact {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("failed to remove {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Download the driver into the working directory and return its bytes.
///
/// The downloaded file is deleted once read. If the download itself fails the
/// file is left alone and nothing is read.
pub fn fetch_driver(
    config: &BuildConfiguration,
    runner: &mut dyn CommandRunner,
) -> BuildResult<Vec<u8>> {
    let url = driver_url(config);
    let path = config.work_dir.join(driver_file_name(config.platform));

    tracing::info!("Fetching driver from {}", url);

    // wget picks a new name (`.1`) if the target already exists.
    remove_file_if_exists(&path)?;

    match config.download_tool {
        DownloadTool::Wget => {
            let wget = ProcessBuilder::new("wget").arg(&url).cwd(&config.work_dir);
            runner
                .run(&wget)
                .map_err(|e| BuildError::download(&url, e))?;
        }
        DownloadTool::Http => http_download(&url, &path)?,
    }

    let artifact = DownloadedArtifact::new(path);
    let contents = fs::read(&artifact.path)
        .map_err(|e| BuildError::download(&url, BuildError::io(&artifact.path, e)))?;
    artifact.remove()?;

    tracing::debug!("driver is {} bytes", contents.len());
    Ok(contents)
}

/// Fetch `url` in-process and save it to `dest`.
fn http_download(url: &str, dest: &Path) -> BuildResult<()> {
    let response = reqwest::blocking::get(url).map_err(|e| BuildError::download(url, e))?;

    if !response.status().is_success() {
        return Err(BuildError::download(
            url,
            format!("HTTP {}", response.status()),
        ));
    }

    let bytes = response
        .bytes()
        .map_err(|e| BuildError::download(url, e))?;
    fs::write(dest, &bytes).map_err(|e| BuildError::download(url, BuildError::io(dest, e)))?;

    Ok(())
}
