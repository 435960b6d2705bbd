use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use studyplan_core::{
    build_plan, parse_blocks, place_slot, render_plan_text, select_days, Config, IcsWriter,
    StudyPlan, TimeInterval,
};

use super::today_or_local;

/// Overrides applied on top of the saved inputs.
#[derive(Args, Debug)]
pub struct PlanOverrides {
    /// Course or project name
    #[arg(long)]
    course: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,
    /// Base session length in minutes
    #[arg(long)]
    minutes: Option<u32>,
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,
    /// morning, lunch, evening or any
    #[arg(long)]
    preference: Option<String>,
    /// Timezone label for calendar export
    #[arg(long)]
    timezone: Option<String>,
    /// Planning day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Persist the overrides to the config file
    #[arg(long)]
    save: bool,
}

impl PlanOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(course) = &self.course {
            config.plan.course_name = course.clone();
        }
        if let Some(due) = self.due {
            config.plan.due_date = Some(due);
        }
        if let Some(minutes) = self.minutes {
            config.plan.session_minutes = minutes;
        }
        if let Some(difficulty) = &self.difficulty {
            config.plan.difficulty = difficulty.clone();
        }
        if let Some(preference) = &self.preference {
            config.plan.preference = preference.clone();
        }
        if let Some(timezone) = &self.timezone {
            config.plan.timezone = timezone.clone();
        }
    }

    fn build(&self) -> Result<StudyPlan, Box<dyn std::error::Error>> {
        let mut config = Config::load()?;
        self.apply(&mut config);
        if self.save {
            config.save()?;
        }
        let request = config.plan_request(today_or_local(self.today))?;
        let plan = build_plan(&request)?;
        for session in plan.conflicting_sessions() {
            eprintln!(
                "warning: {} {} overlaps a commitment (day fully booked)",
                session.date, session.slot
            );
        }
        Ok(plan)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Ics,
    Text,
}

impl ExportFormat {
    fn default_file(&self) -> &'static str {
        match self {
            Self::Ics => "study-plan-with-schedule.ics",
            Self::Text => "study-plan.txt",
        }
    }
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build and print the plan
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: PlanOverrides,
    },
    /// Write the plan to a calendar or text file
    Export {
        #[arg(long, value_enum, default_value = "ics")]
        format: ExportFormat,
        /// Output path, or "-" for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        overrides: PlanOverrides,
    },
    /// Spaced day offsets for a day count and session target
    Days {
        total_days: u32,
        target_sessions: u32,
    },
    /// Place one session in a day
    Slot {
        /// Busy ranges, e.g. "09:00-12:00, 13:00-17:00"
        #[arg(long, default_value = "")]
        busy: String,
        /// Preferred window, e.g. "18:00-22:00"
        #[arg(long, default_value = "06:00-22:00")]
        preferred: TimeInterval,
        /// Fallback window
        #[arg(long, default_value = "06:00-22:00")]
        fallback: TimeInterval,
        /// Session length in minutes
        #[arg(long)]
        minutes: u32,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Show { json, overrides } => {
            let plan = overrides.build()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", plan.due_label());
                println!();
                print!("{}", render_plan_text(&plan));
            }
        }
        PlanAction::Export {
            format,
            output,
            overrides,
        } => {
            let plan = overrides.build()?;
            let content = match format {
                ExportFormat::Ics => IcsWriter::new(chrono::Utc::now()).write(&plan),
                ExportFormat::Text => render_plan_text(&plan),
            };

            let path = output.unwrap_or_else(|| PathBuf::from(format.default_file()));
            if path.as_os_str() == "-" {
                print!("{content}");
            } else {
                std::fs::write(&path, content)?;
                println!(
                    "wrote {} sessions to {}",
                    plan.sessions.len(),
                    path.display()
                );
            }
        }
        PlanAction::Days {
            total_days,
            target_sessions,
        } => {
            let days = select_days(total_days, target_sessions)?;
            println!("{}", serde_json::to_string(&days)?);
        }
        PlanAction::Slot {
            busy,
            preferred,
            fallback,
            minutes,
        } => {
            let busy = parse_blocks(&busy);
            let slot = place_slot(&busy, preferred, fallback, minutes)?;
            if slot.overlaps_any(&busy) {
                eprintln!("warning: no free slot, forced placement overlaps busy time");
            }
            println!("{slot}");
        }
    }
    Ok(())
}
