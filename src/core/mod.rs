//! Core build types: platforms, identifiers, and errors.

pub mod build_id;
pub mod errors;
pub mod platform;

pub use errors::{BuildError, BuildResult};
pub use platform::Platform;
