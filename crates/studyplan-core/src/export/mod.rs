//! Plan export: iCalendar files and plain text.

pub mod ics;
pub mod text;

pub use ics::{escape_text, IcsWriter};
pub use text::render_plan_text;
