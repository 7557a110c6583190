//! Subtract command implementation.

use super::models::SubtractArgs;
use super::utils::{load_engine_config, print_diagnostics};
use crate::diff::check_compatibility;
use crate::output::json::{read_profile, write_profile};
use crate::subtract::subtract_with;
use anyhow::{Context, Result};
use colored::*;

/// Execute the subtract command
pub fn execute_subtract(args: SubtractArgs) -> Result<()> {
    let config = load_engine_config(args.config.as_deref())?;

    let total = read_profile(&args.total).context("Failed to read total profile")?;
    let selection = read_profile(&args.selection).context("Failed to read selection profile")?;

    check_compatibility(&total.metadata, &selection.metadata, &config)
        .context("Profiles cannot be subtracted")?;

    let outcome = subtract_with(&total, &selection, &config).context("Failed to subtract profiles")?;

    write_profile(&outcome.value, &args.output).context("Failed to write residual profile")?;
    println!(
        "📊 Residual profile written to {} ({} ticks)",
        args.output.display().to_string().cyan(),
        outcome.value.flamebearer.num_ticks
    );
    print_diagnostics(&outcome.diagnostics);

    Ok(())
}
