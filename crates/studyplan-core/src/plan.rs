//! Study plan builder.
//!
//! Composes the day selector and slot placer:
//! - Counts the days from today through the deadline
//! - Derives a session target from the difficulty profile
//! - Picks spaced days and places one session on each, avoiding the
//!   weekday's commitments
//! - Attaches a checklist for the session's stage in the timeline
//!
//! Every input is passed in explicitly. Nothing here reads the clock,
//! the environment, or the disk.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::busy::BusyLayout;
use crate::clock::TimeInterval;
use crate::days::select_days;
use crate::error::{Result, ValidationError};
use crate::phase::{phase_of, session_minutes, Stage};
use crate::profile::{target_sessions, Difficulty, TimePreference};
use crate::slot::SlotPlacer;

/// Everything needed to build a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub course_name: String,
    pub today: NaiveDate,
    pub due: NaiveDate,
    /// Base length of each session in minutes
    pub session_minutes: u32,
    pub difficulty: Difficulty,
    pub preference: TimePreference,
    /// IANA name used only to label exported calendar events
    pub timezone: String,
    pub busy: BusyLayout,
}

/// One placed study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub day_offset: u32,
    pub slot: TimeInterval,
    pub minutes: u32,
    pub phase: f64,
    pub stage: Stage,
    pub tasks: Vec<String>,
    /// Slot overlaps a commitment (forced placement on a fully booked day)
    pub conflicts: bool,
}

/// Kind of commitment block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockKind {
    Work,
    Class,
    Gathering,
}

/// A commitment on a concrete date, exported alongside the sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarBlock {
    pub kind: BlockKind,
    pub date: NaiveDate,
    pub slot: TimeInterval,
}

/// A generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub course_name: String,
    pub today: NaiveDate,
    pub due: NaiveDate,
    pub days_left: u32,
    pub difficulty: Difficulty,
    pub preference: TimePreference,
    pub timezone: String,
    pub sessions: Vec<StudySession>,
    pub calendar_blocks: Vec<CalendarBlock>,
}

impl StudyPlan {
    /// Short countdown label, e.g. "Due today" or "5 days left".
    pub fn due_label(&self) -> String {
        match self.days_left {
            0 => "Due today".to_string(),
            1 => "1 day left".to_string(),
            n => format!("{n} days left"),
        }
    }

    /// Sessions placed on top of a commitment.
    pub fn conflicting_sessions(&self) -> impl Iterator<Item = &StudySession> {
        self.sessions.iter().filter(|session| session.conflicts)
    }
}

/// Build a plan from a request.
///
/// # Errors
///
/// Returns a validation error if the course name is blank, the session
/// length is zero, or the deadline is before `today`.
pub fn build_plan(request: &PlanRequest) -> Result<StudyPlan> {
    let course_name = request.course_name.trim();
    if course_name.is_empty() {
        return Err(ValidationError::EmptyField("course_name".into()).into());
    }
    if request.session_minutes == 0 {
        return Err(ValidationError::invalid_argument(
            "session_minutes",
            "must be greater than zero",
        )
        .into());
    }

    let days_left = (request.due - request.today).num_days();
    if days_left < 0 {
        return Err(ValidationError::DeadlinePassed {
            today: request.today,
            due: request.due,
        }
        .into());
    }
    let days_left = u32::try_from(days_left).map_err(|_| {
        ValidationError::invalid_argument("due", "deadline is too far in the future")
    })?;
    let total_days = days_left + 1;

    let profile = request.difficulty.profile();
    let target = target_sessions(total_days, &profile);
    let offsets = select_days(total_days, target)?;
    tracing::debug!(
        total_days,
        target,
        selected = offsets.len(),
        "selected study days"
    );

    let placer = SlotPlacer::new(
        request.preference.window(),
        TimePreference::fallback_window(),
    );

    let mut sessions = Vec::with_capacity(offsets.len());
    for day_offset in offsets {
        let date = request.today + Duration::days(i64::from(day_offset));
        let weekday = date.weekday();
        let phase = phase_of(day_offset, total_days);
        let minutes = session_minutes(request.session_minutes, phase);

        let busy = request.busy.busy_for(weekday);
        let slot = placer.place(&busy, minutes)?;
        let conflicts = slot.overlaps_any(&busy);
        if conflicts {
            tracing::warn!(%date, %slot, "study session overlaps a commitment");
        }

        let stage = Stage::from_phase(phase);
        sessions.push(StudySession {
            date,
            weekday,
            day_offset,
            slot,
            minutes,
            phase,
            stage,
            tasks: stage.checklist().iter().map(|task| task.to_string()).collect(),
            conflicts,
        });
    }

    Ok(StudyPlan {
        course_name: course_name.to_string(),
        today: request.today,
        due: request.due,
        days_left,
        difficulty: request.difficulty,
        preference: request.preference,
        timezone: request.timezone.clone(),
        sessions,
        calendar_blocks: calendar_blocks(&request.busy, request.today, total_days),
    })
}

/// Expand the weekly layout into dated blocks for every day of the plan.
pub fn calendar_blocks(busy: &BusyLayout, today: NaiveDate, total_days: u32) -> Vec<CalendarBlock> {
    let mut blocks = Vec::new();
    for offset in 0..total_days {
        let date = today + Duration::days(i64::from(offset));
        let weekday = date.weekday();
        let day = busy.week.day(weekday);

        let work = day.work.iter().map(|slot| (BlockKind::Work, *slot));
        let classes = day.classes.iter().map(|slot| (BlockKind::Class, *slot));
        let gathering = busy
            .gathering_on(weekday)
            .map(|slot| (BlockKind::Gathering, slot));

        blocks.extend(
            work.chain(classes)
                .chain(gathering)
                .map(|(kind, slot)| CalendarBlock { kind, date, slot }),
        );
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::busy::{DayCommitments, Gathering, WeekLayout};
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(today: NaiveDate, due: NaiveDate) -> PlanRequest {
        PlanRequest {
            course_name: "Biology 101".to_string(),
            today,
            due,
            session_minutes: 45,
            difficulty: Difficulty::Medium,
            preference: TimePreference::Evening,
            timezone: "America/Chicago".to_string(),
            busy: BusyLayout::default(),
        }
    }

    #[test]
    fn due_today_yields_one_session() {
        let today = date(2026, 10, 19);
        let plan = build_plan(&request(today, today)).unwrap();

        assert_eq!(plan.days_left, 0);
        assert_eq!(plan.due_label(), "Due today");
        assert_eq!(plan.sessions.len(), 1);

        let session = &plan.sessions[0];
        assert_eq!(session.phase, 0.0);
        assert_eq!(session.stage, Stage::Comprehension);
        assert_eq!(session.slot.to_string(), "18:00-18:45");
    }

    #[test]
    fn one_week_plan_spans_today_to_deadline() {
        // 2026-10-19 is a Monday.
        let today = date(2026, 10, 19);
        let plan = build_plan(&request(today, date(2026, 10, 25))).unwrap();

        // total 7, target 6: walk gives 1, 2, 4; 6 is the deadline; fill round(5/2) = 3.
        let offsets: Vec<u32> = plan.sessions.iter().map(|s| s.day_offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 6]);

        let last = plan.sessions.last().unwrap();
        assert_eq!(last.date, date(2026, 10, 25));
        assert_eq!(last.weekday, Weekday::Sun);
        assert_eq!(last.stage, Stage::Finalization);
        assert_eq!(last.minutes, 54);
        assert_eq!(last.slot.to_string(), "18:00-18:54");
    }

    #[test]
    fn sessions_avoid_commitments_and_fall_back() {
        let today = date(2026, 10, 19);
        let week = WeekLayout::new().with_day(
            Weekday::Mon,
            DayCommitments::from_text("09:00-17:00", "18:00-21:30"),
        );
        let mut req = request(today, date(2026, 10, 25));
        req.busy = BusyLayout::new(week, None);

        let plan = build_plan(&req).unwrap();
        let monday = &plan.sessions[0];
        // Evening only has 21:30-22:00 free, too short; first wide-window gap is 06:00.
        assert_eq!(monday.slot.to_string(), "06:00-06:45");
        assert!(!monday.conflicts);
    }

    #[test]
    fn fully_booked_day_is_flagged() {
        let today = date(2026, 10, 19);
        let week = WeekLayout::new()
            .with_day(Weekday::Mon, DayCommitments::from_text("00:00-24:00", ""));
        let mut req = request(today, today);
        req.busy = BusyLayout::new(week, None);

        let plan = build_plan(&req).unwrap();
        assert_eq!(plan.sessions[0].slot.to_string(), "21:15-22:00");
        assert!(plan.sessions[0].conflicts);
        assert_eq!(plan.conflicting_sessions().count(), 1);
    }

    #[test]
    fn oversized_session_is_clamped_to_the_day() {
        let today = date(2026, 10, 19);
        let week = WeekLayout::new()
            .with_day(Weekday::Mon, DayCommitments::from_text("00:00-24:00", ""));
        let mut req = request(today, today);
        req.busy = BusyLayout::new(week, None);
        req.session_minutes = u32::MAX;

        let plan = build_plan(&req).unwrap();
        assert_eq!(plan.sessions[0].slot.to_string(), "06:00-24:00");
        assert!(plan.sessions[0].conflicts);
    }

    #[test]
    fn calendar_blocks_cover_every_day() {
        let today = date(2026, 10, 19);
        let week = WeekLayout::new()
            .with_day(Weekday::Tue, DayCommitments::from_text("09:00-17:00", "18:00-19:00"));
        let gathering = Gathering {
            weekday: Weekday::Thu,
            start: 19 * 60,
            minutes: 60,
        };
        let busy = BusyLayout::new(week, Some(gathering));

        let blocks = calendar_blocks(&busy, today, 14);
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Work,
                BlockKind::Class,
                BlockKind::Gathering,
                BlockKind::Work,
                BlockKind::Class,
                BlockKind::Gathering,
            ]
        );
        assert_eq!(blocks[2].date, date(2026, 10, 22));
    }

    #[test]
    fn rejects_past_deadline_and_blank_inputs() {
        let today = date(2026, 10, 19);

        let err = build_plan(&request(today, date(2026, 10, 18))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DeadlinePassed { .. })
        ));

        let mut blank = request(today, today);
        blank.course_name = "   ".into();
        assert!(build_plan(&blank).is_err());

        let mut zero = request(today, today);
        zero.session_minutes = 0;
        assert!(build_plan(&zero).is_err());
    }

    #[test]
    fn plan_is_deterministic() {
        let req = request(date(2026, 10, 19), date(2026, 12, 1));
        let first = serde_json::to_string(&build_plan(&req).unwrap()).unwrap();
        let second = serde_json::to_string(&build_plan(&req).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
