//! # StudyPlan Core Library
//!
//! This library provides the core logic for StudyPlan, a deadline-driven
//! study-session planner. All scheduling is pure: the same inputs always
//! produce the same plan, and nothing reads the clock, the disk, or the
//! environment except the storage and export collaborators.
//!
//! ## Architecture
//!
//! - **Day Selector**: spaced-repetition choice of study days between today
//!   and the deadline
//! - **Slot Placer**: first-fit placement of a session inside a preferred
//!   window, then a fallback window, then a forced late slot
//! - **Plan Builder**: composes both with weekly commitments and attaches
//!   stage checklists
//! - **Storage**: TOML-based saved inputs
//! - **Export**: iCalendar and plain-text rendering
//!
//! ## Key Components
//!
//! - [`select_days`]: Day Selector
//! - [`place_slot`] / [`SlotPlacer`]: Slot Placer
//! - [`build_plan`]: Plan Builder
//! - [`Config`]: Saved planner inputs

pub mod busy;
pub mod clock;
pub mod days;
pub mod error;
pub mod export;
pub mod phase;
pub mod plan;
pub mod profile;
pub mod slot;
pub mod storage;

pub use busy::{parse_blocks, BusyLayout, DayCommitments, Gathering, WeekLayout};
pub use clock::{add_minutes, minutes_to_time, time_to_minutes, TimeInterval};
pub use days::select_days;
pub use error::{ConfigError, CoreError, ValidationError};
pub use export::{render_plan_text, IcsWriter};
pub use phase::Stage;
pub use plan::{build_plan, BlockKind, CalendarBlock, PlanRequest, StudyPlan, StudySession};
pub use profile::{Difficulty, DifficultyProfile, TimePreference};
pub use slot::{place_slot, SlotPlacer};
pub use storage::Config;
