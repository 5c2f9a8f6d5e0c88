//! Work duration fixup.
//!
//! Makes every day of a work period reach a minimum number of hours.
//!
//! # Algorithm Summary
//!
//! 1. If enabled, walk the days with a [`DayStepper`] and synthesize a
//!    placeholder day (one entry of exactly the minimum) for every skipped date.
//!    Placeholders are appended after the pass, so the period is no longer
//!    sorted when any were added.
//! 2. For each day below the minimum (in whole hours), spread the missing
//!    minutes evenly over the end times of all its entries.
//! 3. Round the day up to a whole hour by extending one randomly chosen entry.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::Serialize;

use crate::config::AutoTuneConfig;
use crate::model::{Day, Entry, Project, WorkPeriod};
use crate::plugin::{ConfigurationError, ConfigurationShape, ProcessPlugin, ProcessReport};
use crate::stepper::DayStepper;

const MINUTES_PER_HOUR: i64 = 60;

/// Clock time of placeholder entries. Only their length carries meaning.
const PLACEHOLDER_START: NaiveDateTime = match (
    NaiveDate::from_ymd_opt(2000, 1, 1),
    NaiveTime::from_hms_opt(1, 0, 0),
) {
    (Some(date), Some(time)) => NaiveDateTime::new(date, time),
    _ => panic!("invalid placeholder start"),
};

/// What a single pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixupReport {
    /// Days present before the pass.
    pub days_examined: usize,
    /// Days whose entries were stretched.
    pub days_topped_up: usize,
    /// Days left short because the missing minutes were out of range.
    pub days_skipped_overflow: usize,
    /// Days left short because they have no entries to stretch.
    pub days_skipped_empty: usize,
    /// Placeholder days appended for calendar gaps.
    pub days_synthesized: usize,
}

impl From<FixupReport> for ProcessReport {
    fn from(report: FixupReport) -> Self {
        Self::default()
            .with("day(s) examined", report.days_examined)
            .with("topped up", report.days_topped_up)
            .with("synthesized", report.days_synthesized)
            .with("skipped (overflow)", report.days_skipped_overflow)
            .with("skipped (no entries)", report.days_skipped_empty)
    }
}

/// Result of topping up a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopUp {
    Done,
    Overflow,
    NoEntries,
}

/// The auto-tune pass. Owns the random source used for hour rounding.
#[derive(Debug)]
pub struct AutoTune<R = ThreadRng> {
    rng: R,
}

impl AutoTune<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for AutoTune<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> AutoTune<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Runs the pass over `work_period` with already parsed options.
    ///
    /// The period is mutated in place. Validation happens before any day is
    /// touched.
    pub fn run(
        &mut self,
        work_period: &mut WorkPeriod,
        config: &AutoTuneConfig,
    ) -> Result<FixupReport, ConfigurationError> {
        config.validate()?;
        tracing::info!(days = work_period.len(), "fixing work durations");

        let mut report = FixupReport {
            days_examined: work_period.len(),
            ..FixupReport::default()
        };
        let Some(first_date) = work_period.first_day().map(|day| day.date) else {
            tracing::info!("work period is empty, nothing to do");
            return Ok(report);
        };

        let minimum = config.minimum_daily_work_duration;
        let mut stepper = DayStepper::new(first_date);
        let mut placeholders = Vec::new();

        for day in work_period.days_mut() {
            if config.add_missing_days {
                let step = stepper.step(day.date);
                if !step.success && step.skipped_days() > 0 {
                    tracing::warn!(
                        from = %step.previous_date,
                        to = %day.date,
                        missing = step.skipped_days(),
                        "found missing day(s)"
                    );
                    placeholders
                        .extend(step.missing_dates().map(|date| placeholder_day(date, config)));
                }
            }

            if day.work_duration().num_hours() < i64::from(minimum) {
                match self.top_up(day, minimum) {
                    TopUp::Done => report.days_topped_up += 1,
                    TopUp::Overflow => report.days_skipped_overflow += 1,
                    TopUp::NoEntries => report.days_skipped_empty += 1,
                }
            }
        }

        report.days_synthesized = placeholders.len();
        work_period.append_days(placeholders);

        tracing::info!(
            topped_up = report.days_topped_up,
            synthesized = report.days_synthesized,
            skipped = report.days_skipped_overflow + report.days_skipped_empty,
            "done fixing work durations"
        );
        Ok(report)
    }

    /// Stretches a short day to the minimum. The day is only modified when
    /// every new end time can be represented.
    fn top_up(&mut self, day: &mut Day, minimum_hours: i32) -> TopUp {
        let worked = day.work_duration();
        let missing = target_duration(minimum_hours) - worked;
        tracing::debug!(
            date = %day.date,
            worked_minutes = worked.num_minutes(),
            missing_minutes = missing.num_minutes(),
            "not enough hours"
        );

        let total_minutes_to_add = missing.num_minutes().max(0);
        if total_minutes_to_add > i64::from(i32::MAX) {
            tracing::error!(
                date = %day.date,
                total_minutes_to_add,
                "would have to add too many minutes, skipping day"
            );
            return TopUp::Overflow;
        }
        if day.entries.is_empty() {
            tracing::warn!(date = %day.date, "day has no entries to stretch, skipping day");
            return TopUp::NoEntries;
        }

        let Some(ends) = self.plan_ends(day, total_minutes_to_add) else {
            tracing::error!(
                date = %day.date,
                total_minutes_to_add,
                "entry end out of range, skipping day"
            );
            return TopUp::Overflow;
        };
        for (entry, end) in day.entries.iter_mut().zip(ends) {
            entry.end = end;
        }

        tracing::debug!(
            date = %day.date,
            worked_minutes = day.work_duration().num_minutes(),
            "fixed work duration"
        );
        TopUp::Done
    }

    /// New end of every entry: an even share of the missing minutes, plus the
    /// rounding to the next whole hour on one random entry.
    fn plan_ends(&mut self, day: &Day, total_minutes_to_add: i64) -> Option<Vec<NaiveDateTime>> {
        let entry_count = i64::try_from(day.entries.len()).unwrap_or(i64::MAX);
        let minutes_per_entry = total_minutes_to_add / entry_count;
        tracing::debug!(date = %day.date, minutes_per_entry, "adding minutes to each entry");

        let mut ends = day
            .entries
            .iter()
            .map(|entry| entry.extended_end(minutes_per_entry))
            .collect::<Option<Vec<_>>>()?;

        let distributed = day
            .entries
            .iter()
            .zip(&ends)
            .fold(Duration::zero(), |total, (entry, end)| total + (*end - entry.start));
        let still_missing =
            MINUTES_PER_HOUR - distributed.num_minutes().rem_euclid(MINUTES_PER_HOUR);
        if still_missing != MINUTES_PER_HOUR {
            tracing::debug!(date = %day.date, still_missing, "rounding up to the hour");
            let index = self.rng.gen_range(0..ends.len());
            ends[index] = ends[index].checked_add_signed(Duration::minutes(still_missing))?;
        }
        Some(ends)
    }
}

impl<R: Rng> ProcessPlugin for AutoTune<R> {
    fn name(&self) -> &'static str {
        AutoTuneConfig::SHAPE.section
    }

    fn configuration_shape(&self) -> ConfigurationShape {
        AutoTuneConfig::SHAPE
    }

    fn process(
        &mut self,
        work_period: &mut WorkPeriod,
        configuration: Option<&serde_json::Value>,
    ) -> Result<ProcessReport, ConfigurationError> {
        let config = AutoTuneConfig::from_value(configuration)?;
        self.run(work_period, &config).map(ProcessReport::from)
    }
}

/// A duration of exactly `hours`, independent of any clock instant.
fn target_duration(hours: i32) -> Duration {
    // Any i32 number of hours is far inside the range of `Duration`.
    Duration::hours(i64::from(hours))
}

/// A day holding a single entry of exactly the configured minimum.
fn placeholder_day(date: NaiveDate, config: &AutoTuneConfig) -> Day {
    let entry = Entry::new(
        PLACEHOLDER_START,
        PLACEHOLDER_START + target_duration(config.minimum_daily_work_duration),
        Project::new(config.default_project_name.clone()),
        false,
    );
    Day::new(date, vec![entry])
}
