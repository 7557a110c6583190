//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Only fatal conditions live here. Recoverable findings (self/total
//! mismatches, clamped residuals) are reported as
//! [`Diagnostic`](super::diagnostics::Diagnostic)s next to a best-effort result.

use thiserror::Error;

/// Fatal errors while decoding, validating or re-encoding a flamebearer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlamebearerError {
    #[error("malformed encoding at depth {depth}: {reason}")]
    MalformedEncoding { depth: usize, reason: String },

    #[error("invalid name index {index} at depth {depth}, name table has {len} entries")]
    UnknownName {
        depth: usize,
        index: i64,
        len: usize,
    },

    #[error("unsupported flamebearer format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported flamebearer version {0}")]
    UnsupportedVersion(u32),

    #[error("a profile must have at least one symbol name")]
    EmptyNames,

    #[error("expected a {expected} profile, got {actual}")]
    FormatMismatch { expected: String, actual: String },
}

impl FlamebearerError {
    /// Shorthand for a [`FlamebearerError::MalformedEncoding`]
    pub fn malformed(depth: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEncoding {
            depth,
            reason: reason.into(),
        }
    }
}

/// Profiles that cannot be combined.
///
/// Diff and subtract assume pre-validated input; callers run
/// [`check_compatibility`](crate::diff::check_compatibility) first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityError {
    #[error("left units ({left}) does not match right units ({right})")]
    UnitMismatch { left: String, right: String },

    #[error("left sample rate ({left}) does not match right sample rate ({right})")]
    SampleRateMismatch { left: u32, right: u32 },
}

/// Errors that can occur during file input/output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
