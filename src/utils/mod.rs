//! Utility modules for configuration, error handling, and diagnostics.

pub mod config;
pub mod diagnostics;
pub mod error;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Outcome};
pub use error::{CompatibilityError, ConfigError, FlamebearerError, OutputError};
