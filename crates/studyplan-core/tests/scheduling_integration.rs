//! Integration tests for the day selector, slot placer, and plan builder.

use chrono::{NaiveDate, TimeZone, Utc, Weekday};
use studyplan_core::{
    build_plan, minutes_to_time, place_slot, render_plan_text, select_days, time_to_minutes,
    Config, CoreError, IcsWriter, Stage, TimeInterval, ValidationError,
};

fn iv(start: u32, end: u32) -> TimeInterval {
    TimeInterval::new(start, end).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_day_selector_reference_cases() {
    assert_eq!(select_days(1, 1).unwrap(), vec![0]);
    assert_eq!(select_days(2, 2).unwrap(), vec![0, 1]);
    assert_eq!(select_days(10, 1).unwrap(), vec![0, 9]);
    assert_eq!(select_days(14, 5).unwrap(), vec![0, 1, 2, 4, 13]);
}

#[test]
fn test_day_selector_front_loads_sessions() {
    let days = select_days(60, 20).unwrap();
    let gaps: Vec<u32> = days.windows(2).map(|w| w[1] - w[0]).collect();

    // Gap walk: 1, 2, 4, 6, 9, ... widening toward the deadline.
    assert_eq!(&days[..6], &[0, 1, 2, 4, 6, 9]);
    assert!(gaps[0] <= gaps[gaps.len() - 2]);
    assert_eq!(*days.last().unwrap(), 59);
}

#[test]
fn test_day_selector_rejects_bad_arguments() {
    for (total, target) in [(0, 1), (5, 0), (3, 4)] {
        assert!(matches!(
            select_days(total, target),
            Err(ValidationError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_slot_placer_reference_cases() {
    let morning = iv(360, 600);
    let any = iv(360, 1320);

    assert_eq!(place_slot(&[], morning, any, 30).unwrap(), iv(360, 390));
    assert_eq!(place_slot(&[iv(360, 420)], morning, any, 90).unwrap(), iv(420, 510));

    let forced = place_slot(&[iv(0, 1440)], morning, any, 30).unwrap();
    assert_eq!(forced.to_string(), "21:30-22:00");
}

#[test]
fn test_fixed_rule_table_is_a_window_configuration() {
    // A lunch-only rule: try 11:30-13:30, else anywhere in the day.
    let lunch = iv(690, 810);
    let any = iv(360, 1320);
    let busy = [iv(690, 750)];
    assert_eq!(place_slot(&busy, lunch, any, 60).unwrap(), iv(750, 810));
    assert_eq!(place_slot(&busy, lunch, any, 61).unwrap(), iv(360, 421));
}

#[test]
fn test_time_round_trip() {
    for text in ["00:00", "06:05", "12:30", "23:59", "24:00"] {
        assert_eq!(minutes_to_time(time_to_minutes(text).unwrap()), text);
    }
}

#[test]
fn test_full_plan_workflow_from_saved_inputs() {
    let today = date(2026, 10, 19);
    let mut config = Config::reset_for(today);
    config.set_value("plan.course_name", "Organic Chemistry").unwrap();
    config.set_value("plan.difficulty", "hard").unwrap();
    config.set_value("plan.preference", "morning").unwrap();
    config.set_value("week.Mon.work", "06:00-09:00").unwrap();
    config.set_value("week.Tue.class", "08:00-10:00").unwrap();
    config.set_value("gathering.day", "Wed").unwrap();
    config.set_value("gathering.start", "06:00").unwrap();

    let plan = build_plan(&config.plan_request(today).unwrap()).unwrap();

    assert_eq!(plan.days_left, 7);
    assert_eq!(plan.sessions.first().unwrap().date, today);
    assert_eq!(plan.sessions.last().unwrap().date, date(2026, 10, 26));
    assert!(plan.sessions.iter().all(|s| !s.conflicts));

    let monday = &plan.sessions[0];
    assert_eq!(monday.weekday, Weekday::Mon);
    assert_eq!(monday.slot.to_string(), "09:00-09:45");
    assert_eq!(monday.stage, Stage::Comprehension);

    let tuesday = plan.sessions.iter().find(|s| s.weekday == Weekday::Tue).unwrap();
    assert_eq!(tuesday.slot.to_string(), "06:00-06:45");

    let wednesday = plan.sessions.iter().find(|s| s.weekday == Weekday::Wed).unwrap();
    assert_eq!(wednesday.slot.to_string(), "07:00-07:45");

    let deadline = plan.sessions.last().unwrap();
    assert_eq!(deadline.stage, Stage::Finalization);
    assert_eq!(deadline.minutes, 54);
    // Second Monday: work until 09:00 pushes the boosted session.
    assert_eq!(deadline.slot.to_string(), "09:00-09:54");

    let text = render_plan_text(&plan);
    assert!(text.starts_with("Project: Organic Chemistry\nDue: 2026-10-26 (7 days left)\n"));
    assert!(text.contains("Mon, Oct 19, 2026  09:00-09:45 (45 min)"));

    let stamp = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
    let ics = IcsWriter::new(stamp).write(&plan);
    let events = ics.matches("BEGIN:VEVENT").count();
    assert_eq!(events, plan.sessions.len() + plan.calendar_blocks.len());
    // Two Mondays, one Tuesday and one Wednesday fall in the range.
    assert_eq!(plan.calendar_blocks.len(), 4);
}

#[test]
fn test_past_deadline_is_reported() {
    let today = date(2026, 10, 19);
    let mut config = Config::default();
    config.plan.course_name = "Late".into();
    config.plan.due_date = Some(date(2026, 10, 1));

    let err = build_plan(&config.plan_request(today).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::DeadlinePassed { .. })
    ));
}
