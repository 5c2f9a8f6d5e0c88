//! Work period fixup for time tracking records.
//!
//! This crate contains the domain types and logic for:
//! - Gap detection: finding calendar dates missing from a work period
//! - Fixup: topping up short days to a minimum and rounding them to whole hours
//! - Plugins: the trait a host driver uses to run passes over a work period

mod config;
mod fixup;
pub mod model;
pub mod plugin;
pub mod stepper;

pub use config::AutoTuneConfig;
pub use fixup::{AutoTune, FixupReport};
pub use model::{Day, Entry, Project, WorkPeriod};
pub use plugin::{
    ConfigurationError, ConfigurationShape, Counter, OptionKind, OptionSpec, ProcessPlugin,
    ProcessReport,
};
pub use stepper::{DayStepResult, DayStepper};
