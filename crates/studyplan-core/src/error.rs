//! Core error types for studyplan-core.
//!
//! This module defines the error hierarchy using thiserror. Scheduling
//! operations only ever fail with [`ValidationError`]; the configuration
//! collaborator adds [`ConfigError`] on top.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Caller-contract violation on a scheduling operation
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// Unparseable or out-of-range wall-clock time
    #[error("Invalid time '{0}': expected HH:MM between 00:00 and 24:00")]
    InvalidTime(String),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start}) and at most 1440")]
    InvalidTimeRange { start: u32, end: u32 },

    /// Deadline lies before the planning day
    #[error("Due date {due} is in the past (today is {today}). Choose a future date.")]
    DeadlinePassed {
        today: chrono::NaiveDate,
        due: chrono::NaiveDate,
    },

    /// Required field left blank
    #[error("Empty field: {0}")]
    EmptyField(String),
}

impl ValidationError {
    pub(crate) fn invalid_argument(argument: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
