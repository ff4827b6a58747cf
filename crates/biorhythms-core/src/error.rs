//! Core error types for biorhythms-core.
//!
//! Construction-time problems (bad rhythm configuration, negative windows)
//! are reported through [`ValidationError`]; settings persistence problems
//! through [`ConfigError`]. Generation itself never fails once its inputs
//! have been validated.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for biorhythms-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse settings
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),

    /// Invalid settings value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the settings schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Required settings key has no value
    #[error("Missing required setting: {0}")]
    MissingKey(String),
}

/// Validation errors raised when building rhythms and windows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Rhythm period must be finite and strictly positive
    #[error("Invalid rhythm config for '{name}': period {period} must be a positive number of days")]
    InvalidRhythmConfig { name: String, period: f64 },

    /// Two rhythms in one set share a period
    #[error("Duplicate rhythm period: {period}")]
    DuplicatePeriod { period: f64 },

    /// A rhythm set needs at least one rhythm
    #[error("Rhythm set is empty")]
    EmptyRhythmSet,

    /// Day window bounds must be non-negative
    #[error("Invalid window: {field} must be >= 0 (got {value})")]
    InvalidWindow { field: &'static str, value: i64 },

    /// Day window bounds are capped so a window stays allocatable
    #[error("Invalid window: {field} must be <= {max} (got {value})")]
    WindowTooLarge {
        field: &'static str,
        value: i64,
        max: u32,
    },

    /// Date string could not be parsed or is out of range
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
