//! Work period domain model: projects, entries, days.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A named project that entries are booked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One contiguous worked interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub project: Project,
    /// Carried through untouched.
    #[serde(default)]
    pub billable: bool,
}

impl Entry {
    pub const fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        project: Project,
        billable: bool,
    ) -> Self {
        Self {
            start,
            end,
            project,
            billable,
        }
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The end moved `minutes` later, or `None` if that falls outside the
    /// representable date range.
    pub fn extended_end(&self, minutes: i64) -> Option<NaiveDateTime> {
        self.end.checked_add_signed(Duration::try_minutes(minutes)?)
    }
}

/// All entries tracked on a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Day {
    pub const fn new(date: NaiveDate, entries: Vec<Entry>) -> Self {
        Self { date, entries }
    }

    /// Sum of all entry durations.
    pub fn work_duration(&self) -> Duration {
        self.entries
            .iter()
            .fold(Duration::zero(), |total, entry| total + entry.duration())
    }
}

/// The set of tracked days under consideration, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    #[serde(default)]
    days: Vec<Day>,
}

impl WorkPeriod {
    /// Builds a period from days that are already in date order.
    pub const fn new(days: Vec<Day>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn days_mut(&mut self) -> &mut [Day] {
        &mut self.days
    }

    pub fn first_day(&self) -> Option<&Day> {
        self.days.first()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Appends days at the end, without reordering.
    pub fn append_days(&mut self, days: impl IntoIterator<Item = Day>) {
        self.days.extend(days);
    }

    /// Whether days are in strictly ascending date order.
    pub fn is_sorted(&self) -> bool {
        self.days.windows(2).all(|pair| pair[0].date < pair[1].date)
    }

    /// Restores ascending date order, e.g. after synthesized days were appended.
    pub fn sort_days(&mut self) {
        self.days.sort_by_key(|day| day.date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).expect("valid test time")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_work_duration_sums_entries() {
        let d = date(2020, 1, 3);
        let project = Project::new("acme");
        let day = Day::new(
            d,
            vec![
                Entry::new(at(d, 9, 0), at(d, 12, 30), project.clone(), true),
                Entry::new(at(d, 13, 0), at(d, 15, 0), project, false),
            ],
        );

        assert_eq!(day.work_duration(), Duration::minutes(330));
    }

    #[test]
    fn test_work_duration_of_empty_day_is_zero() {
        let day = Day::new(date(2020, 1, 3), Vec::new());
        assert_eq!(day.work_duration(), Duration::zero());
    }

    #[test]
    fn test_extended_end() {
        let d = date(2020, 1, 3);
        let entry = Entry::new(at(d, 9, 0), at(d, 10, 0), Project::new("acme"), false);

        assert_eq!(entry.extended_end(45), Some(at(d, 10, 45)));
    }

    #[test]
    fn test_extended_end_out_of_range() {
        let d = date(2020, 1, 3);
        let entry = Entry::new(at(d, 9, 0), at(d, 10, 0), Project::new("acme"), false);
        let near_max = Entry::new(
            NaiveDateTime::MAX - Duration::minutes(70),
            NaiveDateTime::MAX - Duration::minutes(10),
            Project::new("acme"),
            false,
        );

        assert_eq!(entry.extended_end(i64::MAX), None);
        assert_eq!(near_max.extended_end(5), Some(NaiveDateTime::MAX - Duration::minutes(5)));
        assert_eq!(near_max.extended_end(11), None);
    }

    #[test]
    fn test_sort_days_restores_order() {
        let mut period = WorkPeriod::new(vec![Day::new(date(2020, 1, 4), Vec::new())]);
        period.append_days([Day::new(date(2020, 1, 2), Vec::new())]);
        assert!(!period.is_sorted());

        period.sort_days();

        assert!(period.is_sorted());
        assert_eq!(period.days()[0].date, date(2020, 1, 2));
    }

    #[test]
    fn test_work_period_json_shape() {
        let json = r#"{
            "days": [{
                "date": "2020-01-03",
                "entries": [{
                    "start": "2020-01-03T09:00:00",
                    "end": "2020-01-03T15:00:00",
                    "project": {"name": "acme"}
                }]
            }]
        }"#;

        let period: WorkPeriod = serde_json::from_str(json).unwrap();

        assert_eq!(period.len(), 1);
        let day = &period.days()[0];
        assert_eq!(day.date, date(2020, 1, 3));
        assert!(!day.entries[0].billable);
        assert_eq!(day.work_duration(), Duration::hours(6));
    }
}
