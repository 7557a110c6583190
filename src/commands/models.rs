use std::path::PathBuf;

/// Arguments for the inspect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Profile JSON file to inspect
    pub file: PathBuf,

    /// Number of functions listed in the summary
    pub top: usize,

    /// Optional engine configuration (TOML)
    pub config: Option<PathBuf>,
}

/// Arguments for the diff command
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Base profile
    pub left: PathBuf,

    /// Profile compared against the base
    pub right: PathBuf,

    /// Where the "double" profile is written
    pub output: PathBuf,

    /// Optional engine configuration (TOML)
    pub config: Option<PathBuf>,
}

/// Arguments for the subtract command
#[derive(Debug, Clone)]
pub struct SubtractArgs {
    /// Full aggregate
    pub total: PathBuf,

    /// Selected sub-aggregate taken out of `total`
    pub selection: PathBuf,

    /// Where the residual profile is written
    pub output: PathBuf,

    /// Optional engine configuration (TOML)
    pub config: Option<PathBuf>,
}
