//! Core error types for procrastination-core.
//!
//! The analysis engine never panics on bad input data. Every failure is
//! surfaced as a [`CoreError`] for the caller to handle, except malformed
//! start times which the time analyzer recovers from locally.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for procrastination-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Nothing to analyze (no tasks or no activities)
    #[error("No {0} data to analyze")]
    EmptyData(&'static str),

    /// Deadline or date text that is not `YYYY-MM-DD`
    #[error("Invalid date format '{input}': expected YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    /// Start time text that is not `HH:MM`
    #[error("Malformed start time '{input}': expected HH:MM")]
    MalformedTime { input: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown activity category
    #[error(
        "Unknown activity category '{0}' (expected study, assignment, rest, entertainment or other)"
    )]
    UnknownCategory(String),

    /// Unknown task status
    #[error("Unknown task status '{0}' (expected pending, in_progress, done or late)")]
    UnknownStatus(String),

    /// Integer rating outside 1-10
    #[error("{field} must be between 1 and 10, got {value}")]
    RatingOutOfRange { field: &'static str, value: i64 },

    /// Negative or non-finite hours
    #[error("{field} must be a non-negative number of hours, got {value}")]
    InvalidHours { field: &'static str, value: f64 },

    /// Completion date present/absent against the task status
    #[error("Task {id}: {message}")]
    CompletionDate { id: u64, message: &'static str },

    /// No id left above the highest stored one
    #[error("No {0} id available: the largest id is already in use")]
    IdExhausted(&'static str),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
