//! Plain-text rendering of a plan for pasting into notes or chat.

use crate::plan::StudyPlan;

/// Human date label, e.g. "Mon, Oct 19, 2026".
pub fn date_label(date: chrono::NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Render the plan as a header followed by one block per session.
pub fn render_plan_text(plan: &StudyPlan) -> String {
    let mut lines = vec![
        format!("Project: {}", plan.course_name),
        format!("Due: {} ({} days left)", plan.due.format("%Y-%m-%d"), plan.days_left),
        String::new(),
    ];

    for session in &plan.sessions {
        lines.push(format!(
            "{}  {} ({} min)",
            date_label(session.date),
            session.slot,
            session.minutes
        ));
        lines.extend(session.tasks.iter().map(|task| format!("  - {task}")));
        lines.push(String::new());
    }

    lines.join("\n")
}
