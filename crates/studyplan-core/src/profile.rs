//! Difficulty tiers, time-of-day preferences, and session targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::{TimeInterval, EARLY_BOUNDARY, LATE_BOUNDARY};

/// How demanding the material is; drives session density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Session density derived from a [`Difficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub sessions_per_week: u32,
    /// Extra sessions per week, added on top of the base density
    pub review_boost: f64,
}

impl Difficulty {
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                sessions_per_week: 4,
                review_boost: 0.0,
            },
            Self::Medium => DifficultyProfile {
                sessions_per_week: 5,
                review_boost: 0.5,
            },
            Self::Hard => DifficultyProfile {
                sessions_per_week: 6,
                review_boost: 1.0,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Unrecognized tiers fall back to [`Difficulty::Medium`].
impl FromStr for Difficulty {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time of day the student would rather study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Lunch,
    #[default]
    Evening,
    Any,
}

impl TimePreference {
    /// Window searched first for this preference.
    pub fn window(&self) -> TimeInterval {
        match self {
            Self::Morning => TimeInterval::from_bounds(6 * 60, 10 * 60),
            Self::Lunch => TimeInterval::from_bounds(11 * 60 + 30, 13 * 60 + 30),
            Self::Evening => TimeInterval::from_bounds(18 * 60, 22 * 60),
            Self::Any => TimeInterval::from_bounds(EARLY_BOUNDARY, LATE_BOUNDARY),
        }
    }

    /// Window searched when the preferred one has no room.
    pub fn fallback_window() -> TimeInterval {
        Self::Any.window()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Lunch => "lunch",
            Self::Evening => "evening",
            Self::Any => "any",
        }
    }
}

/// Unrecognized preferences fall back to [`TimePreference::Any`].
impl FromStr for TimePreference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Self::Morning,
            "lunch" => Self::Lunch,
            "evening" => Self::Evening,
            _ => Self::Any,
        })
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of study days to aim for across `total_days`.
///
/// At least 60% of the days (and at least one), at most every day.
pub fn target_sessions(total_days: u32, profile: &DifficultyProfile) -> u32 {
    let total_days = total_days.max(1);
    let weeks = f64::from(total_days) / 7.0;
    let base = (weeks * f64::from(profile.sessions_per_week)).round() as u32;
    let boost = (profile.review_boost * weeks).round() as u32;
    let min_sessions = ((f64::from(total_days) * 0.6).round() as u32).clamp(1, total_days);

    (base + boost).clamp(min_sessions, total_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_fixed_per_tier() {
        assert_eq!(Difficulty::Easy.profile().sessions_per_week, 4);
        assert_eq!(Difficulty::Medium.profile().review_boost, 0.5);
        assert_eq!(Difficulty::Hard.profile().sessions_per_week, 6);
    }

    #[test]
    fn unknown_difficulty_is_medium() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("brutal".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("".parse::<Difficulty>().unwrap(), Difficulty::Medium);
    }

    #[test]
    fn preference_windows() {
        assert_eq!(TimePreference::Morning.window().to_string(), "06:00-10:00");
        assert_eq!(TimePreference::Lunch.window().to_string(), "11:30-13:30");
        assert_eq!(TimePreference::Evening.window().to_string(), "18:00-22:00");
        assert_eq!(TimePreference::fallback_window().to_string(), "06:00-22:00");
        assert_eq!("whenever".parse::<TimePreference>().unwrap(), TimePreference::Any);
    }

    #[test]
    fn target_sessions_respects_sixty_percent_floor() {
        // One week, medium: base 5 + round(0.5) = 6; floor round(4.2) = 4.
        assert_eq!(target_sessions(7, &Difficulty::Medium.profile()), 6);
        // Four weeks, easy: base 16, floor round(16.8) = 17.
        assert_eq!(target_sessions(28, &Difficulty::Easy.profile()), 17);
        // Four weeks, hard: 24 + 4 = 28 capped at 28.
        assert_eq!(target_sessions(28, &Difficulty::Hard.profile()), 28);
    }

    #[test]
    fn target_sessions_for_single_day() {
        assert_eq!(target_sessions(1, &Difficulty::Hard.profile()), 1);
        assert_eq!(target_sessions(1, &Difficulty::Easy.profile()), 1);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        let pref: TimePreference = serde_json::from_str("\"lunch\"").unwrap();
        assert_eq!(pref, TimePreference::Lunch);
    }
}
