//! Configuration and constants for the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Highest flamebearer profile version we understand
pub const SUPPORTED_VERSION: u32 = 1;

/// Values per node in a "single" level
pub const SINGLE_TUPLE_WIDTH: usize = 4;

/// Values per node in a "double" (diff) level
pub const DOUBLE_TUPLE_WIDTH: usize = 7;

/// Name used for the root when a profile carries no name table
pub const ROOT_NAME: &str = "total";

/// Engine options
///
/// Every field has a default, so a partial TOML file is fine:
///
/// ```toml
/// check_invariants = true
/// allow_empty_units = false
/// max_diagnostics = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recompute self/total for every node and report mismatches
    pub check_invariants: bool,

    /// Accept a units mismatch when one of the two profiles has no units
    pub allow_empty_units: bool,

    /// Reject profiles with different non-zero sample rates
    pub check_sample_rate: bool,

    /// Diagnostics kept per operation; further findings are only counted
    pub max_diagnostics: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_invariants: true,
            allow_empty_units: true,
            check_sample_rate: true,
            max_diagnostics: 256,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}

/// Load engine options from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&contents)?;
    Ok(config)
}
