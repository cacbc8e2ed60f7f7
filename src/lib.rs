//! node-build - build orchestration for the record/replay Node runtime
//!
//! Embeds a fresh build identifier and the platform's record/replay driver
//! into the Node source tree, then runs the platform build pipeline.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for node-build unit tests.
///
/// Only compiled for tests. Provides a recording command runner and a
/// scratch project helper.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildError, BuildResult, Platform};
pub use ops::{build, run_for_os, run_from_env, BuildOutcome};
pub use util::{BuildConfiguration, CommandRunner, ProcessBuilder, SystemRunner};
