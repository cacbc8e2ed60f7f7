//! Shared utilities

pub mod config;
pub mod fs;
pub mod lock;
pub mod process;

pub use config::{BuildConfiguration, DownloadTool};
pub use lock::BuildLock;
pub use process::{CommandRunner, ProcessBuilder, SystemRunner};
