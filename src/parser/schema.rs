//! Wire schema definitions for flamebearer profiles.
//!
//! Field names follow the JSON produced by the profiling backend
//! (camelCase). Unknown fields such as `timeline` or `heatmap` are ignored.

use crate::utils::config::{DOUBLE_TUPLE_WIDTH, SINGLE_TUPLE_WIDTH, SUPPORTED_VERSION};
use crate::utils::error::FlamebearerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level profile structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Data format version; missing means 1
    #[serde(default = "default_version")]
    pub version: u32,

    /// The encoded call tree
    pub flamebearer: Flamebearer,

    /// Metadata associated to the profile
    #[serde(default)]
    pub metadata: Metadata,

    /// Samples in the left / base profile. Only set on "double" profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_ticks: Option<u64>,

    /// Samples in the right / diff profile. Only set on "double" profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ticks: Option<u64>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// The compact call tree: name table plus delta-encoded levels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flamebearer {
    /// Symbol names, referenced by index from the levels
    pub names: Vec<String>,

    /// One row per depth; each row is a flat run of fixed-width tuples
    pub levels: Vec<Vec<i64>>,

    /// Total number of samples
    pub num_ticks: u64,

    /// Maximum self value in any node
    pub max_self: u64,

    /// Some producers repeat the format here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Profile metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// "single" or "double"
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spy_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u64>,
}

fn default_format() -> String {
    Format::Single.as_str().to_string()
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            format: default_format(),
            spy_name: None,
            sample_rate: None,
            units: None,
            app_name: None,
            name: None,
            start_time: None,
            end_time: None,
            query: None,
            max_nodes: None,
        }
    }
}

impl Metadata {
    /// Units, with a missing value read as empty
    pub fn units_str(&self) -> &str {
        self.units.as_deref().unwrap_or("")
    }

    /// Sample rate, with a missing value read as zero
    pub fn sample_rate_or_zero(&self) -> u32 {
        self.sample_rate.unwrap_or(0)
    }
}

/// Level layout of a flamebearer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `(offset, total, self, name)`
    Single,
    /// `(offsetL, totalL, selfL, offsetR, totalR, selfR, name)`
    Double,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Single => "single",
            Format::Double => "double",
        }
    }

    /// Number of integers per node in a level
    pub fn tuple_width(&self) -> usize {
        match self {
            Format::Single => SINGLE_TUPLE_WIDTH,
            Format::Double => DOUBLE_TUPLE_WIDTH,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = FlamebearerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Format::Single),
            "double" => Ok(Format::Double),
            other => Err(FlamebearerError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Profile {
    /// Resolve the level layout.
    ///
    /// `metadata.format` wins; the flamebearer copy is a fallback for
    /// producers that leave the metadata format empty.
    pub fn format(&self) -> Result<Format, FlamebearerError> {
        if !self.metadata.format.is_empty() {
            return self.metadata.format.parse();
        }
        match &self.flamebearer.format {
            Some(f) => f.parse(),
            None => Ok(Format::Single),
        }
    }

    /// True when the profile holds no samples
    pub fn is_empty(&self) -> bool {
        self.flamebearer.num_ticks == 0 || self.flamebearer.levels.is_empty()
    }
}
