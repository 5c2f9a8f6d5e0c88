//! Process command: runs the configured plugins over a work period.
//!
//! Reads a work period as JSON from a file or stdin and writes the result as
//! pretty-printed JSON.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use at_core::{ProcessPlugin, ProcessReport, WorkPeriod};
use clap::Args;

use crate::{Config, registry};

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Work period JSON file (defaults to stdin).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Sort days by date before writing, so placeholder days land in place.
    #[arg(long)]
    pub sort: bool,

    /// Print what each processor did to stderr.
    #[arg(long)]
    pub report: bool,
}

/// Outcome of one processor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRun {
    pub name: String,
    pub report: ProcessReport,
}

pub fn run<W: Write, E: Write>(
    writer: &mut W,
    diagnostics: &mut E,
    args: &ProcessArgs,
    config: &Config,
) -> Result<()> {
    let mut period = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_work_period(BufReader::new(file))
                .with_context(|| format!("failed to read work period from {}", path.display()))?
        }
        None => read_work_period(io::stdin().lock()).context("failed to read work period from stdin")?,
    };

    let runs = apply_processors(&mut period, config, registry::create)?;

    if args.sort {
        period.sort_days();
    } else if !period.is_sorted() {
        tracing::debug!("work period is no longer sorted by date");
    }

    serde_json::to_writer_pretty(&mut *writer, &period).context("failed to write work period")?;
    writeln!(writer)?;

    if args.report {
        for run in &runs {
            writeln!(diagnostics, "{}", format_report(run))?;
        }
    }
    Ok(())
}

pub fn read_work_period<R: Read>(reader: R) -> Result<WorkPeriod> {
    let period: WorkPeriod = serde_json::from_reader(reader).context("invalid work period JSON")?;
    if !period.is_sorted() {
        tracing::warn!("input days are not in ascending date order");
    }
    Ok(period)
}

/// Runs every processor named in `config.processors`, in order.
///
/// Stops at the first processor that rejects its configuration.
pub fn apply_processors<F>(
    period: &mut WorkPeriod,
    config: &Config,
    mut create: F,
) -> Result<Vec<PluginRun>>
where
    F: FnMut(&str) -> Option<Box<dyn ProcessPlugin>>,
{
    let mut runs = Vec::with_capacity(config.processors.len());
    for name in &config.processors {
        let mut plugin = create(name).with_context(|| {
            let known: Vec<_> = registry::names().collect();
            format!("unknown processor `{name}` (registered: {})", known.join(", "))
        })?;
        tracing::debug!(processor = %name, "running processor");
        let report = plugin
            .process(period, config.options_for(name))
            .with_context(|| format!("processor `{name}` failed"))?;
        runs.push(PluginRun {
            name: name.clone(),
            report,
        });
    }
    Ok(runs)
}

pub fn format_report(run: &PluginRun) -> String {
    format!("{}: {}", run.name, run.report)
}
