//! Spaced-repetition day selection.
//!
//! Picks which day offsets between today (0) and the deadline
//! (`total_days - 1`) receive a study session. Sessions cluster near the
//! start and spread out as the gaps widen.

use std::collections::BTreeSet;

use crate::error::ValidationError;

/// Widening gaps walked forward from day 0, each value repeated twice.
pub const GAP_SEQUENCE: [u32; 20] = [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10];

/// Select the day offsets that receive a session.
///
/// Both endpoints are always included, so the result can be longer than
/// `target_sessions` (e.g. `select_days(10, 1) == [0, 9]`). It can also be
/// shorter when the interpolation fill lands on offsets that are already
/// taken; both outcomes are expected.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidArgument`] if `total_days == 0` or
/// `target_sessions` is outside `[1, total_days]`. Inputs are never clamped here.
pub fn select_days(total_days: u32, target_sessions: u32) -> Result<Vec<u32>, ValidationError> {
    if total_days == 0 {
        return Err(ValidationError::invalid_argument(
            "total_days",
            "must be at least 1",
        ));
    }
    if target_sessions == 0 || target_sessions > total_days {
        return Err(ValidationError::invalid_argument(
            "target_sessions",
            format!("{target_sessions} is outside [1, {total_days}]"),
        ));
    }

    let last = total_days - 1;
    let target = target_sessions as usize;
    let mut chosen = BTreeSet::from([0, last]);

    let mut offset = 0;
    for gap in GAP_SEQUENCE {
        if chosen.len() >= target {
            break;
        }
        offset += gap;
        if offset >= last {
            break;
        }
        chosen.insert(offset);
    }

    if chosen.len() < target {
        // Only reachable with total_days >= 3, so the clamp range is non-empty.
        let remaining = (target - chosen.len()) as u32;
        let span = f64::from(total_days - 2);
        for k in 1..=remaining {
            let position = (f64::from(k) * span / f64::from(remaining + 1)).round() as u32;
            chosen.insert(position.clamp(1, total_days - 2));
        }
    }

    Ok(chosen.into_iter().collect())
}
