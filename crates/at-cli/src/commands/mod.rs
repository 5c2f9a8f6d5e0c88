//! CLI subcommand implementations.

pub mod plugins;
pub mod process;
