//! Day-gap detection over a chronological sequence of dates.

use chrono::{Days, NaiveDate};

/// Outcome of a single [`DayStepper::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStepResult {
    /// True iff the stepped-to date is exactly one day after the previous one.
    pub success: bool,
    /// The date seen before this step.
    pub previous_date: NaiveDate,
    /// The date stepped to.
    pub date: NaiveDate,
}

impl DayStepResult {
    /// Number of calendar days strictly between `previous_date` and `date`.
    ///
    /// Zero for consecutive dates, duplicates, and out-of-order input.
    pub fn skipped_days(&self) -> u64 {
        let gap = (self.date - self.previous_date).num_days();
        u64::try_from(gap - 1).unwrap_or(0)
    }

    /// The dates that were skipped, oldest first.
    pub fn missing_dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let previous = self.previous_date;
        (1..=self.skipped_days()).filter_map(move |offset| previous.checked_add_days(Days::new(offset)))
    }
}

/// Walks dates one at a time, remembering the last one seen.
///
/// Input is expected in ascending order; this is not checked.
#[derive(Debug, Clone)]
pub struct DayStepper {
    current_date: NaiveDate,
}

impl DayStepper {
    pub const fn new(start: NaiveDate) -> Self {
        Self {
            current_date: start,
        }
    }

    pub const fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Advances to `next_date`, whether or not it is the direct successor.
    pub fn step(&mut self, next_date: NaiveDate) -> DayStepResult {
        let previous_date = self.current_date;
        self.current_date = next_date;
        DayStepResult {
            success: (next_date - previous_date).num_days() == 1,
            previous_date,
            date: next_date,
        }
    }
}
