//! Core error types for yeolgong-core.
//!
//! Timer state-machine misuse is never an error (disallowed transitions are
//! no-ops). Errors here cover the few places that can genuinely fail:
//! rejecting a malformed timer spec, and talking to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for yeolgong-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No timer with the given id is registered
    #[error("Timer not found: {0}")]
    TimerNotFound(String),

    /// No subject with the given id exists
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    /// No D-day with the given id exists
    #[error("D-day not found: {0}")]
    DDayNotFound(String),

    /// No to-do with the given id exists
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Store refused the write (used by in-memory stores)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration decoded but breaks an invariant
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration that must be positive was zero
    #[error("Invalid duration for '{field}': must be greater than zero")]
    ZeroDuration { field: &'static str },

    /// A duration exceeded the configured ceiling
    #[error("Duration for '{field}' is {value}s, above the maximum of {max}s")]
    DurationTooLong {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// The tier table must contain at least one tier
    #[error("Tier table is empty")]
    EmptyTierTable,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
