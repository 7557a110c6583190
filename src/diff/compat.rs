//! Checks that two profiles can be combined at all.

use crate::parser::schema::Metadata;
use crate::utils::config::EngineConfig;
use crate::utils::error::CompatibilityError;
use log::debug;

/// Check if two profiles are compatible for diffing or subtraction
///
/// # Arguments
/// * `left` - Metadata of the base (or total) profile
/// * `right` - Metadata of the compared (or selection) profile
/// * `config` - Decides whether empty units and sample rates are checked
///
/// # Errors
/// * `CompatibilityError::UnitMismatch` - Units differ. With
///   `allow_empty_units`, a side with no units matches anything.
/// * `CompatibilityError::SampleRateMismatch` - Both sample rates are set
///   and differ
pub fn check_compatibility(
    left: &Metadata,
    right: &Metadata,
    config: &EngineConfig,
) -> Result<(), CompatibilityError> {
    let (lu, ru) = (left.units_str(), right.units_str());
    if lu != ru {
        let one_empty = lu.is_empty() || ru.is_empty();
        if !(config.allow_empty_units && one_empty) {
            return Err(CompatibilityError::UnitMismatch {
                left: lu.to_string(),
                right: ru.to_string(),
            });
        }
        debug!("Units differ but one side is empty, continuing");
    }

    if config.check_sample_rate {
        let (lr, rr) = (left.sample_rate_or_zero(), right.sample_rate_or_zero());
        if lr != rr && lr != 0 && rr != 0 {
            return Err(CompatibilityError::SampleRateMismatch {
                left: lr,
                right: rr,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(units: Option<&str>, sample_rate: Option<u32>) -> Metadata {
        Metadata {
            units: units.map(str::to_string),
            sample_rate,
            ..Metadata::default()
        }
    }

    #[test]
    fn test_matching_units_pass() {
        let config = EngineConfig::default();
        assert!(check_compatibility(&meta(Some("samples"), Some(100)), &meta(Some("samples"), Some(100)), &config).is_ok());
    }

    #[test]
    fn test_unit_mismatch() {
        let err = check_compatibility(
            &meta(Some("samples"), None),
            &meta(Some("objects"), None),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "left units (samples) does not match right units (objects)"
        );
    }

    #[test]
    fn test_empty_units_allowed_by_default() {
        let config = EngineConfig::default();
        assert!(check_compatibility(&meta(None, None), &meta(Some("bytes"), None), &config).is_ok());

        let strict = EngineConfig {
            allow_empty_units: false,
            ..EngineConfig::default()
        };
        assert!(matches!(
            check_compatibility(&meta(None, None), &meta(Some("bytes"), None), &strict),
            Err(CompatibilityError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_sample_rates() {
        let config = EngineConfig::default();
        assert_eq!(
            check_compatibility(&meta(None, Some(100)), &meta(None, Some(99)), &config),
            Err(CompatibilityError::SampleRateMismatch { left: 100, right: 99 })
        );
        assert!(check_compatibility(&meta(None, Some(100)), &meta(None, None), &config).is_ok());

        let lax = EngineConfig {
            check_sample_rate: false,
            ..EngineConfig::default()
        };
        assert!(check_compatibility(&meta(None, Some(100)), &meta(None, Some(99)), &lax).is_ok());
    }
}
