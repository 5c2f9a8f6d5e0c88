//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::process::ProcessArgs;

/// Work period auto-tuner.
///
/// Tops up short days of a time-tracking work period to a minimum number of
/// hours and fills calendar gaps with placeholder days.
#[derive(Debug, Parser)]
#[command(name = "autotune", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the configured processors over a work period read as JSON.
    Process(ProcessArgs),

    /// List registered processors and the configuration they expect.
    Plugins,
}
