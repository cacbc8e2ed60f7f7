//! Build error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the build pipeline.
pub type BuildResult<T> = Result<T, BuildError>;

/// A fatal error raised by one of the build stages.
///
/// Nothing in the pipeline recovers from these; they propagate to the binary,
/// which prints the chain and exits non-zero.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("platform `{os}` not supported (expected `linux` or `darwin`)")]
    UnsupportedPlatform { os: String },

    #[error("failed to download driver from {url}")]
    DownloadFailure {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("`{command}` failed{}: {detail}", exit_suffix(.status))]
    SubprocessFailure {
        command: String,
        status: Option<i32>,
        detail: String,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("another build holds the lock at {}{}", .path.display(), owner_suffix(.pid))]
    Locked { path: PathBuf, pid: Option<u32> },
}

fn exit_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

fn owner_suffix(pid: &Option<u32>) -> String {
    match pid {
        Some(pid) => format!(" (pid {})", pid),
        None => String::new(),
    }
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap any error as a download failure for `url`.
    pub fn download(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        BuildError::DownloadFailure {
            url: url.into(),
            source: source.into(),
        }
    }
}
