//! Diff command implementation.
//! Orchestrates the comparison of two profiles and writes the diff profile.

use super::models::DiffArgs;
use super::utils::{load_engine_config, print_diagnostics};
use crate::diff::{check_compatibility, diff_profiles_with};
use crate::output::json::{read_profile, write_profile};
use anyhow::{Context, Result};
use colored::*;

/// Execute the diff command
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    let config = load_engine_config(args.config.as_deref())?;

    // Step 1: Load profiles
    let left = read_profile(&args.left).context("Failed to read left profile")?;
    let right = read_profile(&args.right).context("Failed to read right profile")?;

    // Step 2: Refuse profiles that cannot be compared
    check_compatibility(&left.metadata, &right.metadata, &config)
        .context("Profiles cannot be diffed")?;

    // Step 3: Diff
    let outcome = diff_profiles_with(&left, &right, &config).context("Failed to generate diff")?;

    // Step 4: Write output
    write_profile(&outcome.value, &args.output).context("Failed to write diff profile")?;
    println!(
        "📊 Diff profile written to {}",
        args.output.display().to_string().cyan()
    );
    println!(
        "  Left ticks: {}  Right ticks: {}",
        outcome.value.left_ticks.unwrap_or(0),
        outcome.value.right_ticks.unwrap_or(0)
    );
    print_diagnostics(&outcome.diagnostics);

    Ok(())
}
