//! Inspect command implementation.
//! Validates a profile, rebuilds its tree and prints a summary.

use super::models::InspectArgs;
use super::utils::{load_engine_config, print_diagnostics};
use crate::diff::share_percent;
use crate::output::json::read_profile;
use crate::parser::schema::Format;
use crate::parser::validate::validate_profile;
use crate::tree::builder::{build_diff_tree_with, build_tree_with};
use crate::tree::table::{diff_function_table, function_table};
use anyhow::{Context, Result};
use colored::*;

/// Execute the inspect command
pub fn execute_inspect(args: InspectArgs) -> Result<()> {
    let config = load_engine_config(args.config.as_deref())?;
    let profile = read_profile(&args.file)
        .with_context(|| format!("Failed to read profile {}", args.file.display()))?;

    let format = validate_profile(&profile).context("Invalid profile")?;
    println!("{} {}", "✓ Valid profile:".green(), args.file.display());
    println!("  Format: {}", format);
    println!("  Names: {}", profile.flamebearer.names.len());
    println!("  Ticks: {}", profile.flamebearer.num_ticks);
    if let Some(units) = &profile.metadata.units {
        println!("  Units: {}", units);
    }

    match format {
        Format::Single => {
            let outcome = build_tree_with(&profile.flamebearer, &config)
                .context("Failed to rebuild call tree")?;
            let root = &outcome.value;
            println!("  Nodes: {}", root.node_count());
            println!("  Depth: {}", root.depth());

            let mut rows = function_table(root);
            rows.retain(|r| r.name != root.name);
            rows.sort_by(|a, b| b.self_ticks.cmp(&a.self_ticks));

            println!();
            println!("{}", "Top functions by self:".bold());
            for row in rows.iter().take(args.top) {
                println!(
                    "  {:>8} {:>7.2}%  {}",
                    row.self_ticks,
                    share_percent(row.self_ticks, root.total),
                    row.name.cyan()
                );
            }
            println!();
            print_diagnostics(&outcome.diagnostics);
        }
        Format::Double => {
            let outcome = build_diff_tree_with(&profile.flamebearer, &config)
                .context("Failed to rebuild diff tree")?;
            let root = &outcome.value;
            let left_ticks = profile.left_ticks.unwrap_or(root.total_left());
            let right_ticks = profile.right_ticks.unwrap_or(root.total_right());
            println!("  Nodes: {}", root.node_count());
            println!("  Left ticks: {}", left_ticks);
            println!("  Right ticks: {}", right_ticks);

            let mut rows = diff_function_table(root, left_ticks, right_ticks);
            rows.retain(|r| r.name != root.name);
            rows.sort_by(|a, b| b.self_diff.abs().cmp(&a.self_diff.abs()));

            println!();
            println!("{}", "Largest self changes:".bold());
            for row in rows.iter().take(args.top) {
                let change = format!("{:+}", row.self_diff);
                let change = if row.self_diff > 0 {
                    change.red()
                } else {
                    change.green()
                };
                println!(
                    "  {:>8} {:>8} {:>8}  {}",
                    row.self_left,
                    row.self_right,
                    change,
                    row.name.cyan()
                );
            }
            println!();
            print_diagnostics(&outcome.diagnostics);
        }
    }

    Ok(())
}
