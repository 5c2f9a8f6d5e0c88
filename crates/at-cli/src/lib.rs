//! Work period auto-tuner CLI library.
//!
//! This crate hosts the fixup passes from `at-core`: it loads configuration,
//! looks passes up in a static registry and runs them over a work period.

mod cli;
pub mod commands;
mod config;
pub mod registry;

pub use cli::{Cli, Commands};
pub use config::Config;
