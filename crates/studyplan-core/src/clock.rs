//! Wall-clock minutes and intervals within a single calendar day.
//!
//! All times are naive local minutes since midnight in `[0, 1440]`.
//! No timezone conversion happens anywhere in this crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in a day; `24:00` is the end-of-day sentinel.
pub const DAY_MINUTES: u32 = 24 * 60;

/// Earliest start allowed for a forced placement (06:00).
pub const EARLY_BOUNDARY: u32 = 6 * 60;

/// End of a forced placement (22:00).
pub const LATE_BOUNDARY: u32 = 22 * 60;

/// Parse `H:MM` or `HH:MM` into minutes since midnight.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] when the text is not a
/// well-formed time or lies past `24:00`.
pub fn time_to_minutes(text: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidTime(text.to_string());

    let (hours, minutes) = text.split_once(':').ok_or_else(invalid)?;
    let well_formed = (1..=2).contains(&hours.len())
        && minutes.len() == 2
        && hours.bytes().all(|b| b.is_ascii_digit())
        && minutes.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let total = hours * 60 + minutes;
    if minutes >= 60 || total > DAY_MINUTES {
        return Err(invalid());
    }
    Ok(total)
}

/// Render minutes since midnight as zero-padded `HH:MM`, clamped to `[00:00, 24:00]`.
pub fn minutes_to_time(minutes: u32) -> String {
    let minutes = minutes.min(DAY_MINUTES);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Add minutes to an `HH:MM` time, clamping at `24:00`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] if `time` cannot be parsed.
pub fn add_minutes(time: &str, add: u32) -> Result<String, ValidationError> {
    Ok(minutes_to_time(time_to_minutes(time)?.saturating_add(add)))
}

/// Half-open `[start, end)` window within one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct TimeInterval {
    start: u32,
    end: u32,
}

impl TimeInterval {
    /// Create a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] unless `start < end <= 1440`.
    pub fn new(start: u32, end: u32) -> Result<Self, ValidationError> {
        if start >= end || end > DAY_MINUTES {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse two `HH:MM` times into an interval.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(time_to_minutes(start)?, time_to_minutes(end)?)
    }

    /// Crate-internal constructor for values already known to satisfy the invariant.
    pub(crate) fn from_bounds(start: u32, end: u32) -> Self {
        debug_assert!(start < end && end <= DAY_MINUTES);
        Self { start, end }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    /// Check if this interval shares any minute with `other`
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this interval overlaps any of `others`
    pub fn overlaps_any(&self, others: &[TimeInterval]) -> bool {
        others.iter().any(|other| self.overlaps(other))
    }

    pub fn start_time(&self) -> String {
        minutes_to_time(self.start)
    }

    pub fn end_time(&self) -> String {
        minutes_to_time(self.end)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time(), self.end_time())
    }
}

/// Parses `HH:MM-HH:MM`, with optional whitespace around the dash.
impl FromStr for TimeInterval {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidTime(s.to_string()))?;
        Self::parse(start.trim(), end.trim())
    }
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    start: u32,
    end: u32,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl From<TimeInterval> for RawInterval {
    fn from(interval: TimeInterval) -> Self {
        RawInterval {
            start: interval.start,
            end: interval.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_one_and_two_digit_hours() {
        assert_eq!(time_to_minutes("06:00"), Ok(360));
        assert_eq!(time_to_minutes("9:30"), Ok(570));
        assert_eq!(time_to_minutes("24:00"), Ok(1440));
        assert_eq!(time_to_minutes("00:00"), Ok(0));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "9", "9:5", "123:00", "12:60", "24:01", "ab:cd", "-1:00", "12:3x"] {
            assert!(time_to_minutes(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn minutes_to_time_clamps_past_midnight() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(1290), "21:30");
        assert_eq!(minutes_to_time(5000), "24:00");
    }

    #[test]
    fn add_minutes_clamps() {
        assert_eq!(add_minutes("19:00", 60).unwrap(), "20:00");
        assert_eq!(add_minutes("23:30", 90).unwrap(), "24:00");
        assert!(add_minutes("7pm", 10).is_err());
    }

    #[test]
    fn interval_rejects_empty_and_out_of_day_ranges() {
        assert!(TimeInterval::new(600, 600).is_err());
        assert!(TimeInterval::new(700, 600).is_err());
        assert!(TimeInterval::new(0, 1441).is_err());
        assert!(TimeInterval::new(0, 1440).is_ok());
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let morning = TimeInterval::new(360, 420).unwrap();
        let next = TimeInterval::new(420, 480).unwrap();
        let inside = TimeInterval::new(400, 410).unwrap();
        assert!(!morning.overlaps(&next));
        assert!(morning.overlaps(&inside));
        assert!(morning.overlaps_any(&[next, inside]));
    }

    #[test]
    fn interval_display_and_serde() {
        let slot = TimeInterval::parse("07:00", "08:30").unwrap();
        assert_eq!(slot.to_string(), "07:00-08:30");

        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r#"{"start":420,"end":510}"#);
        let back: TimeInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);

        let invalid = serde_json::from_str::<TimeInterval>(r#"{"start":500,"end":400}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn parses_range_text() {
        let slot: TimeInterval = "18:00 - 19:15".parse().unwrap();
        assert_eq!(slot, TimeInterval::new(1080, 1155).unwrap());
        assert!("18:00".parse::<TimeInterval>().is_err());
        assert!("19:00-18:00".parse::<TimeInterval>().is_err());
    }

    proptest! {
        #[test]
        fn hh_mm_round_trips(minutes in 0u32..=DAY_MINUTES) {
            let text = minutes_to_time(minutes);
            prop_assert_eq!(time_to_minutes(&text), Ok(minutes));
            prop_assert_eq!(minutes_to_time(time_to_minutes(&text).unwrap()), text);
        }
    }
}
