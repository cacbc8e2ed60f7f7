//! Build identifier generation.
//!
//! A build identifier ties a compiled artifact back to the run that produced
//! it: `<platform>-node-<YYYYMMDD><random>`, where the random suffix is a plain
//! decimal draw from `[0, 1_000_000_000)`.

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;

use super::platform::Platform;

/// Component name embedded in every identifier.
pub const COMPONENT: &str = "node";

/// Exclusive upper bound of the random suffix.
pub const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Generate an identifier for `platform` from the local clock and thread RNG.
pub fn generate(platform: Platform) -> String {
    generate_with(platform, &Local::now(), &mut rand::thread_rng())
}

/// Generate an identifier from an explicit timestamp and RNG.
///
/// The suffix follows the date stamp directly, with no `-` between them, so
/// ids match `<platform>-node-\d{8}\d+`.
pub fn generate_with<Tz, R>(platform: Platform, now: &DateTime<Tz>, rng: &mut R) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    R: Rng + ?Sized,
{
    let suffix: u32 = rng.gen_range(0..RANDOM_SUFFIX_BOUND);
    format!(
        "{}-{}-{}{}",
        platform.tag(),
        COMPONENT,
        now.format("%Y%m%d"),
        suffix
    )
}
