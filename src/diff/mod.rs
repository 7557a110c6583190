//! Profile diff generation.
//!
//! This module compares two single profiles (left/base vs right) and
//! produces a "double" profile carrying both sides for every call path.
//!
//! # Example
//! ```ignore
//! use flamebearer::diff::{check_compatibility, diff_profiles};
//! use flamebearer::output::json::read_profile;
//!
//! let left = read_profile("base.json")?;
//! let right = read_profile("target.json")?;
//! check_compatibility(&left.metadata, &right.metadata, &EngineConfig::default())?;
//! let diff = diff_profiles(&left, &right)?;
//! ```

mod compat;
mod engine;
pub mod normalizer;

// Public API exports
pub use compat::check_compatibility;
pub use engine::{diff_profiles, diff_profiles_with, diff_trees};
pub use normalizer::{diff_percent, ratio_to_percent, safe_percentage, share_percent};

#[cfg(test)]
mod tests;
