pub mod config;
pub mod plan;

use chrono::NaiveDate;

/// Planning day: `--today` when given, otherwise the local calendar date.
pub fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}
