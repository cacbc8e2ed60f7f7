//! High-level operations.
//!
//! Each build stage lives in its own module; [`node_build::build`] runs them
//! in order.

pub mod dispatch;
pub mod embed;
pub mod fetch;
pub mod node_build;

pub use dispatch::{dispatch, pipeline};
pub use embed::{embed_build_id, embed_constants, embed_driver, ConstantValue, EmbeddedConstant};
pub use fetch::{driver_file_name, driver_url, fetch_driver};
pub use node_build::{build, run_for_os, run_from_env, BuildOutcome};
