//! iCalendar (RFC 5545) export.
//!
//! Emits one `VEVENT` per study session plus one per commitment block so
//! the imported calendar shows the whole week. Times are floating local
//! times tagged with the plan's `TZID`; no conversion is performed.
//!
//! Event UIDs are random by default. Tests inject a deterministic source.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::clock::DAY_MINUTES;
use crate::plan::{BlockKind, StudyPlan};

const PRODUCT_ID: &str = "-//StudyPlan//EN";
const MAX_LINE_OCTETS: usize = 75;

/// Escape a TEXT property value.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Fold a content line at 75 octets without splitting a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for ch in line.chars() {
        // Continuation lines start with a space, which counts toward the limit.
        if used + ch.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            used = 1;
        }
        folded.push(ch);
        used += ch.len_utf8();
    }
    folded
}

/// Local date-time value, e.g. `20261019T180000`. `24:00` rolls to the next day.
fn local_datetime(date: NaiveDate, minutes: u32) -> String {
    let (date, minutes) = if minutes >= DAY_MINUTES {
        (date + Duration::days(1), 0)
    } else {
        (date, minutes)
    };
    format!(
        "{}T{:02}{:02}00",
        date.format("%Y%m%d"),
        minutes / 60,
        minutes % 60
    )
}

struct Event {
    summary: String,
    description: Option<String>,
    date: NaiveDate,
    start: u32,
    end: u32,
}

/// Writes a [`StudyPlan`] as an iCalendar document.
pub struct IcsWriter {
    dtstamp: DateTime<Utc>,
    uid_source: Box<dyn FnMut() -> String>,
}

impl IcsWriter {
    /// Create a writer stamping every event with `dtstamp` and random UIDs.
    pub fn new(dtstamp: DateTime<Utc>) -> Self {
        Self {
            dtstamp,
            uid_source: Box::new(|| uuid::Uuid::new_v4().simple().to_string()),
        }
    }

    /// Replace the random UID token generator.
    pub fn with_uid_source(mut self, source: impl FnMut() -> String + 'static) -> Self {
        self.uid_source = Box::new(source);
        self
    }

    /// Render the full calendar with CRLF line endings.
    pub fn write(&mut self, plan: &StudyPlan) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{PRODUCT_ID}"),
            "CALSCALE:GREGORIAN".to_string(),
            format!("X-WR-TIMEZONE:{}", plan.timezone),
        ];

        let sessions = plan.sessions.iter().map(|session| {
            let description = std::iter::once("Session tasks:".to_string())
                .chain(session.tasks.iter().map(|task| format!("- {task}")))
                .collect::<Vec<_>>()
                .join("\n");
            Event {
                summary: format!("{} - Study Session", plan.course_name),
                description: Some(description),
                date: session.date,
                start: session.slot.start(),
                end: session.slot.end(),
            }
        });

        let blocks = plan.calendar_blocks.iter().map(|block| {
            let (summary, description) = match block.kind {
                BlockKind::Work => ("Work Shift", None),
                BlockKind::Class => ("Class", Some("Class block".to_string())),
                BlockKind::Gathering => ("Gathering", None),
            };
            Event {
                summary: summary.to_string(),
                description,
                date: block.date,
                start: block.slot.start(),
                end: block.slot.end(),
            }
        });

        let events: Vec<Event> = sessions.chain(blocks).collect();
        for event in &events {
            self.push_event(&mut lines, &plan.timezone, event);
        }

        lines.push("END:VCALENDAR".to_string());

        let mut out = lines
            .iter()
            .map(|line| fold_line(line))
            .collect::<Vec<_>>()
            .join("\r\n");
        out.push_str("\r\n");
        out
    }

    fn push_event(&mut self, lines: &mut Vec<String>, timezone: &str, event: &Event) {
        let token = (self.uid_source)();
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:{}-{}-{token}@studyplan",
            event.date.format("%Y-%m-%d"),
            local_datetime(event.date, event.start)
        ));
        lines.push(format!("DTSTAMP:{}", self.dtstamp.format("%Y%m%dT%H%M%SZ")));
        lines.push(format!(
            "DTSTART;TZID={timezone}:{}",
            local_datetime(event.date, event.start)
        ));
        lines.push(format!(
            "DTEND;TZID={timezone}:{}",
            local_datetime(event.date, event.end)
        ));
        lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));
        if let Some(description) = &event.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        lines.push("END:VEVENT".to_string());
    }
}
