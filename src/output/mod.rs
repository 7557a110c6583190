//! Readers and writers for profile files.
//!
//! Profiles go in and out as JSON; terminal summaries are printed by the
//! commands themselves.

pub mod json;

// Re-export main functions
pub use json::{profile_to_string, read_profile, write_profile};
