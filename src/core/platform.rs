//! Host platform resolution.

use std::fmt;

use super::errors::{BuildError, BuildResult};

/// A platform the build knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// Map an OS identifier to a platform.
    ///
    /// Accepts both the Node-style `darwin` and Rust's `macos` spelling.
    pub fn from_os(os: &str) -> BuildResult<Platform> {
        match os {
            "linux" => Ok(Platform::Linux),
            "darwin" | "macos" => Ok(Platform::MacOs),
            _ => Err(BuildError::UnsupportedPlatform { os: os.to_string() }),
        }
    }

    /// The tag used in build identifiers and driver filenames.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
