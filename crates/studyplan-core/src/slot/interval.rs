//! Interval union, window subtraction, and first-fit selection.

use crate::clock::TimeInterval;

/// Sort and union busy intervals.
///
/// Intervals that overlap or touch are merged into one. The result is a
/// minimal, sorted sequence of disjoint intervals.
pub fn merge_intervals(busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|interval| interval.start());

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start() <= last.end() => {
                if interval.end() > last.end() {
                    *last = TimeInterval::from_bounds(last.start(), interval.end());
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Remove every busy interval from `window`, returning the free pieces in order.
///
/// `busy` is applied in the order given; pass it through [`merge_intervals`]
/// first for a minimal result.
pub fn subtract_intervals(window: TimeInterval, busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut free = vec![window];

    for blocked in busy {
        let mut next = Vec::with_capacity(free.len() + 1);
        for piece in &free {
            if !piece.overlaps(blocked) {
                next.push(*piece);
                continue;
            }
            if blocked.start() > piece.start() {
                next.push(TimeInterval::from_bounds(piece.start(), blocked.start()));
            }
            if blocked.end() < piece.end() {
                next.push(TimeInterval::from_bounds(blocked.end(), piece.end()));
            }
        }
        free = next;
        if free.is_empty() {
            break;
        }
    }

    free
}

/// Return the first free interval long enough for `minutes`, truncated to exactly that length.
pub fn first_fit(free: &[TimeInterval], minutes: u32) -> Option<TimeInterval> {
    free.iter()
        .find(|interval| interval.duration_minutes() >= minutes)
        .map(|interval| {
            TimeInterval::from_bounds(interval.start(), interval.start().saturating_add(minutes))
        })
}
