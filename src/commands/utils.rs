//! Helpers shared by the commands.

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::utils::config::{load_config, EngineConfig, SUPPORTED_VERSION};
use crate::utils::diagnostics::Diagnostics;

/// Load the engine configuration, falling back to defaults
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => load_config(p)
            .with_context(|| format!("Failed to load engine config from {}", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Print diagnostics as a short warning list
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        println!("{}", "✓ No inconsistencies found".green());
        return;
    }

    println!(
        "{}",
        format!("⚠ {} inconsistencies found", diagnostics.len()).yellow()
    );
    for d in diagnostics.iter() {
        println!("  - {}", d);
    }
    if diagnostics.suppressed() > 0 {
        println!("  ... and {} more", diagnostics.suppressed());
    }
}

/// Display version information
pub fn display_version() {
    println!("flamebearer v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile format: v{}", SUPPORTED_VERSION);
    println!();
    println!("Decode, diff and subtract flamegraph profiles.");
}
