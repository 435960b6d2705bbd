//! Timeline phase, checklist stages, and late-session duration boost.

use serde::{Deserialize, Serialize};

/// Sessions past this phase get [`LATE_BOOST_FACTOR`] more time.
pub const LATE_BOOST_PHASE: f64 = 0.85;
pub const LATE_BOOST_FACTOR: f64 = 1.2;

/// Fractional position of `day_offset` between today (0.0) and the deadline (1.0).
pub fn phase_of(day_offset: u32, total_days: u32) -> f64 {
    let span = total_days.saturating_sub(1).max(1);
    f64::from(day_offset) / f64::from(span)
}

/// Session length after the late-phase boost.
pub fn session_minutes(base_minutes: u32, phase: f64) -> u32 {
    if phase > LATE_BOOST_PHASE {
        (f64::from(base_minutes) * LATE_BOOST_FACTOR).round() as u32
    } else {
        base_minutes
    }
}

/// Which part of the study arc a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// phase <= 0.25
    Comprehension,
    /// phase <= 0.55
    Retrieval,
    /// phase <= 0.80
    Drafting,
    Finalization,
}

impl Stage {
    pub fn from_phase(phase: f64) -> Self {
        if phase <= 0.25 {
            Self::Comprehension
        } else if phase <= 0.55 {
            Self::Retrieval
        } else if phase <= 0.80 {
            Self::Drafting
        } else {
            Self::Finalization
        }
    }

    /// Fixed checklist for this stage, objective first.
    pub fn checklist(&self) -> &'static [&'static str] {
        match self {
            Self::Comprehension => &[
                "Objective: understand the requirements",
                "Read/watch lesson content (focus on key terms)",
                "Write 5 key takeaways in your own words",
            ],
            Self::Retrieval => &[
                "Objective: strengthen memory through retrieval",
                "Active recall (self-quiz) for 10 minutes",
                "Fix weak spots (targeted re-read only)",
            ],
            Self::Drafting => &[
                "Objective: produce a working draft",
                "Draft the main section (no perfection)",
                "Revise 1-2 items based on rubric",
            ],
            Self::Finalization => &[
                "Objective: finalize and submit confidently",
                "Final edit (grammar + formatting)",
                "Check submission steps, then submit early",
            ],
        }
    }
}
