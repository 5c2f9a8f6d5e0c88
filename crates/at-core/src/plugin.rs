//! The seam between a host driver and the passes it runs over a work period.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::WorkPeriod;

/// Reasons a plugin refuses to run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No options were supplied at all.
    #[error("configuration missing; add the plugin's options to your configuration file")]
    Missing,

    /// Options were supplied but could not be read as the expected structure.
    #[error("configuration has the wrong type: {reason}")]
    WrongShape { reason: String },

    /// An option was read but its value is not acceptable.
    #[error("{option} {reason}")]
    Invalid {
        option: &'static str,
        reason: String,
    },
}

/// Value type of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Integer,
    Boolean,
    String,
}

impl OptionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recognized configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    pub description: &'static str,
}

/// Describes the configuration a plugin expects, so a host can build and
/// check it before invoking the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigurationShape {
    /// Table name the options live under in the host configuration.
    pub section: &'static str,
    pub options: &'static [OptionSpec],
}

impl ConfigurationShape {
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }
}

/// One named count in a [`ProcessReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub label: &'static str,
    pub value: usize,
}

/// What a plugin did to a work period, as labelled counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub counters: Vec<Counter>,
}

impl ProcessReport {
    #[must_use]
    pub fn with(mut self, label: &'static str, value: usize) -> Self {
        self.counters.push(Counter { label, value });
        self
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.counters
            .iter()
            .find(|counter| counter.label == label)
            .map(|counter| counter.value)
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, counter) in self.counters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", counter.value, counter.label)?;
        }
        Ok(())
    }
}

/// A pass that transforms a work period in place.
pub trait ProcessPlugin {
    /// Registry name of the plugin.
    fn name(&self) -> &'static str;

    /// The configuration this plugin expects.
    fn configuration_shape(&self) -> ConfigurationShape;

    /// Runs the pass. `configuration` is the raw options table, if the host
    /// has one for this plugin.
    ///
    /// On error nothing has been modified.
    fn process(
        &mut self,
        work_period: &mut WorkPeriod,
        configuration: Option<&serde_json::Value>,
    ) -> Result<ProcessReport, ConfigurationError>;
}
