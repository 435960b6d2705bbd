//! Time-slot placement within a single day.
//!
//! This module provides:
//! - Interval arithmetic over busy and free windows
//! - A first-fit slot placer with a fallback window and a forced last resort

mod interval;
mod placer;

pub use interval::{first_fit, merge_intervals, subtract_intervals};
pub use placer::{place_slot, SlotPlacer};
