//! Weekly busy layout: work shifts, classes, and a recurring gathering.
//!
//! Free-text ranges such as `"09:00-13:00, 14:00-18:00"` are parsed
//! leniently. Entries that do not parse are dropped, never reported.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::{TimeInterval, DAY_MINUTES};
use crate::slot::merge_intervals;

/// Days in display order, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse comma-separated `H:MM-HH:MM` ranges into sorted, merged intervals.
pub fn parse_blocks(text: &str) -> Vec<TimeInterval> {
    let blocks: Vec<TimeInterval> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();
    merge_intervals(&blocks)
}

/// Fixed commitments on one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCommitments {
    pub work: Vec<TimeInterval>,
    pub classes: Vec<TimeInterval>,
}

impl DayCommitments {
    pub fn from_text(work: &str, classes: &str) -> Self {
        Self {
            work: parse_blocks(work),
            classes: parse_blocks(classes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.classes.is_empty()
    }
}

/// Commitments for each day of the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLayout {
    days: [DayCommitments; 7],
}

impl WeekLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, weekday: Weekday, commitments: DayCommitments) -> Self {
        self.set_day(weekday, commitments);
        self
    }

    pub fn set_day(&mut self, weekday: Weekday, commitments: DayCommitments) {
        self.days[weekday.num_days_from_monday() as usize] = commitments;
    }

    pub fn day(&self, weekday: Weekday) -> &DayCommitments {
        &self.days[weekday.num_days_from_monday() as usize]
    }
}

/// A weekly recurring event, e.g. a club meeting every Thursday at 19:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gathering {
    pub weekday: Weekday,
    /// Minutes since midnight
    pub start: u32,
    pub minutes: u32,
}

impl Gathering {
    /// Busy interval on its weekday, clipped at midnight. `None` if it has no length.
    pub fn interval(&self) -> Option<TimeInterval> {
        let end = self.start.saturating_add(self.minutes).min(DAY_MINUTES);
        TimeInterval::new(self.start, end).ok()
    }
}

/// Everything that blocks study time, looked up per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyLayout {
    pub week: WeekLayout,
    pub gathering: Option<Gathering>,
}

impl BusyLayout {
    pub fn new(week: WeekLayout, gathering: Option<Gathering>) -> Self {
        Self { week, gathering }
    }

    /// Gathering interval if it falls on `weekday`.
    pub fn gathering_on(&self, weekday: Weekday) -> Option<TimeInterval> {
        self.gathering
            .filter(|gathering| gathering.weekday == weekday)
            .and_then(|gathering| gathering.interval())
    }

    /// Unmerged busy time for `weekday`.
    pub fn busy_for(&self, weekday: Weekday) -> Vec<TimeInterval> {
        let day = self.week.day(weekday);
        day.work
            .iter()
            .chain(day.classes.iter())
            .copied()
            .chain(self.gathering_on(weekday))
            .collect()
    }
}
