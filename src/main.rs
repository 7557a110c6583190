//! flamebearer CLI
//!
//! Developer tool around the flamebearer engine: inspect profile files,
//! diff two profiles and subtract a selection from a total.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flamebearer::commands::{
    display_version, execute_diff, execute_inspect, execute_subtract, DiffArgs, InspectArgs,
    SubtractArgs,
};

/// flamebearer - decode, diff and subtract flamegraph profiles
#[derive(Parser, Debug)]
#[command(name = "flamebearer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "FLAMEBEARER_CONFIG")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a profile and print a summary
    Inspect {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Number of functions to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Diff two single profiles into a "double" profile
    Diff {
        /// Base profile
        #[arg(short, long)]
        left: PathBuf,

        /// Profile compared against the base
        #[arg(short, long)]
        right: PathBuf,

        /// Output path for the diff profile
        #[arg(short, long, default_value = "diff.json")]
        output: PathBuf,
    },

    /// Subtract a selection profile from a total profile
    Subtract {
        /// Full aggregate
        #[arg(short, long)]
        total: PathBuf,

        /// Selected sub-aggregate
        #[arg(short, long)]
        selection: PathBuf,

        /// Output path for the residual profile
        #[arg(short, long, default_value = "residual.json")]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Inspect { file, top } => {
            execute_inspect(InspectArgs {
                file,
                top,
                config: cli.config,
            })?;
        }

        Commands::Diff {
            left,
            right,
            output,
        } => {
            execute_diff(DiffArgs {
                left,
                right,
                output,
                config: cli.config,
            })?;
        }

        Commands::Subtract {
            total,
            selection,
            output,
        } => {
            execute_subtract(SubtractArgs {
                total,
                selection,
                output,
                config: cli.config,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
