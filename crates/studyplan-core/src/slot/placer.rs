//! First-fit slot placement with layered fallback.

use crate::clock::{TimeInterval, DAY_MINUTES, EARLY_BOUNDARY, LATE_BOUNDARY};
use crate::error::ValidationError;

use super::interval::{first_fit, merge_intervals, subtract_intervals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Preferred,
    Fallback,
    Forced,
}

/// Places one session per day inside a preferred window, then a wider fallback window.
#[derive(Debug, Clone, Copy)]
pub struct SlotPlacer {
    preferred: TimeInterval,
    fallback: TimeInterval,
}

impl SlotPlacer {
    pub fn new(preferred: TimeInterval, fallback: TimeInterval) -> Self {
        Self {
            preferred,
            fallback,
        }
    }

    /// Find a slot of exactly `minutes_needed` for a day with the given busy time.
    ///
    /// `busy` may be unsorted and overlapping. When neither window has room,
    /// the session is forced to end at 22:00 (starting no earlier than 06:00)
    /// and may overlap busy time; callers wanting a conflict-free slot must
    /// check the result with [`TimeInterval::overlaps_any`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidArgument`] if `minutes_needed == 0`.
    pub fn place(
        &self,
        busy: &[TimeInterval],
        minutes_needed: u32,
    ) -> Result<TimeInterval, ValidationError> {
        if minutes_needed == 0 {
            return Err(ValidationError::invalid_argument(
                "minutes_needed",
                "must be greater than zero",
            ));
        }

        let merged = merge_intervals(busy);
        let (slot, tier) = self
            .fit_within(self.preferred, &merged, minutes_needed)
            .map(|slot| (slot, Tier::Preferred))
            .or_else(|| {
                tracing::debug!(
                    window = %self.preferred,
                    minutes_needed,
                    "preferred window full, trying fallback"
                );
                self.fit_within(self.fallback, &merged, minutes_needed)
                    .map(|slot| (slot, Tier::Fallback))
            })
            .unwrap_or_else(|| (forced_slot(minutes_needed), Tier::Forced));

        if tier == Tier::Forced {
            tracing::debug!(%slot, "no free slot in either window, forcing placement");
        } else {
            tracing::trace!(%slot, ?tier, "placed slot");
        }
        Ok(slot)
    }

    fn fit_within(
        &self,
        window: TimeInterval,
        merged_busy: &[TimeInterval],
        minutes_needed: u32,
    ) -> Option<TimeInterval> {
        first_fit(&subtract_intervals(window, merged_busy), minutes_needed)
    }
}

/// Last-resort slot ending at 22:00, never starting before 06:00.
fn forced_slot(minutes_needed: u32) -> TimeInterval {
    let start = LATE_BOUNDARY.saturating_sub(minutes_needed).max(EARLY_BOUNDARY);
    let end = start.saturating_add(minutes_needed).min(DAY_MINUTES);
    TimeInterval::from_bounds(start, end)
}

/// Convenience function to place a slot without building a [`SlotPlacer`].
pub fn place_slot(
    busy: &[TimeInterval],
    preferred: TimeInterval,
    fallback: TimeInterval,
    minutes_needed: u32,
) -> Result<TimeInterval, ValidationError> {
    SlotPlacer::new(preferred, fallback).place(busy, minutes_needed)
}
