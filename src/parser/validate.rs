//! Structural validation of a profile before it reaches the codec.
//!
//! The constraints are checked by hand since they depend on each other
//! (tuple width depends on format, name indexes on the name table).

use super::schema::{Format, Profile};
use crate::utils::config::SUPPORTED_VERSION;
use crate::utils::error::FlamebearerError;
use log::debug;

/// Validate a profile and return its level layout
///
/// # Errors
/// * `UnsupportedVersion` - version newer than we understand
/// * `UnsupportedFormat` - format other than "single"/"double"
/// * `EmptyNames` - no name table
/// * `MalformedEncoding` - a level whose length is not a multiple of the tuple width
/// * `UnknownName` - a name index outside the name table
pub fn validate_profile(profile: &Profile) -> Result<Format, FlamebearerError> {
    if profile.version > SUPPORTED_VERSION {
        return Err(FlamebearerError::UnsupportedVersion(profile.version));
    }

    let format = profile.format()?;
    let fb = &profile.flamebearer;

    if fb.names.is_empty() {
        return Err(FlamebearerError::EmptyNames);
    }

    let width = format.tuple_width();
    for (depth, level) in fb.levels.iter().enumerate() {
        if level.len() % width != 0 {
            return Err(FlamebearerError::malformed(
                depth,
                format!(
                    "a level should have a multiple of {} values, found {}",
                    width,
                    level.len()
                ),
            ));
        }

        for &index in level.iter().skip(width - 1).step_by(width) {
            if index < 0 || index as usize >= fb.names.len() {
                return Err(FlamebearerError::UnknownName {
                    depth,
                    index,
                    len: fb.names.len(),
                });
            }
        }
    }

    debug!(
        "Validated {} profile: {} names, {} levels",
        format,
        fb.names.len(),
        fb.levels.len()
    );

    Ok(format)
}

/// Validate a profile and require a given level layout
///
/// # Errors
/// Everything [`validate_profile`] returns, plus `FormatMismatch` when
/// the profile is valid but laid out differently.
pub fn validate_as(profile: &Profile, expected: Format) -> Result<(), FlamebearerError> {
    let actual = validate_profile(profile)?;
    if actual != expected {
        return Err(FlamebearerError::FormatMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}
