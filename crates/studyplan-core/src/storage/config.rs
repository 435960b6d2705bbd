//! TOML-based saved planner inputs.
//!
//! Stores everything the planner form asks for:
//! - Course name, due date, session length
//! - Difficulty, time-of-day preference, calendar timezone label
//! - An optional weekly gathering
//! - Free-text work and class hours for each weekday
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::busy::{BusyLayout, DayCommitments, Gathering, WeekLayout, WEEK};
use crate::clock::time_to_minutes;
use crate::error::{ConfigError, Result};
use crate::plan::PlanRequest;

/// Plan-level inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    /// easy, medium or hard; anything else plans as medium
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// morning, lunch, evening or any; anything else plans as any
    #[serde(default = "default_preference")]
    pub preference: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Weekly recurring gathering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatheringConfig {
    /// Weekday name such as "Thu"; unset or blank means no gathering
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default = "default_gathering_start")]
    pub start: String,
    #[serde(default = "default_gathering_minutes")]
    pub minutes: u32,
}

/// Raw busy-hour text for one weekday, e.g. `"09:00-13:00, 14:00-18:00"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayText {
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub class: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub gathering: GatheringConfig,
    #[serde(default = "default_week")]
    pub week: BTreeMap<String, DayText>,
}

// Default functions
fn default_session_minutes() -> u32 {
    45
}
fn default_difficulty() -> String {
    "medium".into()
}
fn default_preference() -> String {
    "evening".into()
}
fn default_timezone() -> String {
    "America/Chicago".into()
}
fn default_gathering_start() -> String {
    "19:00".into()
}
fn default_gathering_minutes() -> u32 {
    60
}
fn default_week() -> BTreeMap<String, DayText> {
    WEEK.iter()
        .map(|day| (day.to_string(), DayText::default()))
        .collect()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            course_name: String::new(),
            due_date: None,
            session_minutes: default_session_minutes(),
            difficulty: default_difficulty(),
            preference: default_preference(),
            timezone: default_timezone(),
        }
    }
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            day: None,
            start: default_gathering_start(),
            minutes: default_gathering_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plan: PlanConfig::default(),
            gathering: GatheringConfig::default(),
            week: default_week(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |part| part.is_empty()) {
            return Err(ConfigError::MissingKey("config key is empty".to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file inside [`data_dir`].
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults first if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Defaults with the due date one week after `today`.
    pub fn reset_for(today: NaiveDate) -> Self {
        let mut cfg = Self::default();
        cfg.plan.due_date = Some(today + Duration::days(7));
        cfg
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory. Returns error if key is unknown.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Parsed weekly commitments. Unparseable ranges are dropped.
    pub fn week_layout(&self) -> WeekLayout {
        let mut layout = WeekLayout::new();
        for weekday in WEEK {
            if let Some(text) = self.week.get(&weekday.to_string()) {
                layout.set_day(weekday, DayCommitments::from_text(&text.work, &text.class));
            }
        }
        layout
    }

    /// Parsed gathering, or `None` when unset or malformed.
    pub fn gathering(&self) -> Option<Gathering> {
        let day = self.gathering.day.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        let weekday = match day.parse::<Weekday>() {
            Ok(weekday) => weekday,
            Err(_) => {
                tracing::warn!(day, "ignoring gathering with unknown weekday");
                return None;
            }
        };
        let start = match time_to_minutes(self.gathering.start.trim()) {
            Ok(start) => start,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring gathering with invalid start");
                return None;
            }
        };
        let minutes = match self.gathering.minutes {
            0 => default_gathering_minutes(),
            n => n,
        };

        Some(Gathering {
            weekday,
            start,
            minutes,
        })
    }

    /// Build a plan request for `today` from the saved inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if no due date is saved.
    pub fn plan_request(&self, today: NaiveDate) -> Result<PlanRequest> {
        let due = self
            .plan
            .due_date
            .ok_or_else(|| ConfigError::MissingKey("plan.due_date".to_string()))?;

        Ok(PlanRequest {
            course_name: self.plan.course_name.clone(),
            today,
            due,
            session_minutes: self.plan.session_minutes,
            difficulty: self.plan.difficulty.parse().unwrap_or_default(),
            preference: self.plan.preference.parse().unwrap_or_default(),
            timezone: self.plan.timezone.clone(),
            busy: BusyLayout::new(self.week_layout(), self.gathering()),
        })
    }
}
