//! Profile wire format: schema types and validation.

pub mod schema;
pub mod validate;

pub use schema::{Flamebearer, Format, Metadata, Profile};
pub use validate::{validate_as, validate_profile};

/// Parse a profile from a JSON string
pub fn parse_profile(json: &str) -> Result<Profile, serde_json::Error> {
    serde_json::from_str(json)
}
