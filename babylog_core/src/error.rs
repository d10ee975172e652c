//! Error types for the babylog_core library.

use chrono::NaiveDateTime;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn a raw cell into a timestamp
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// A string matched none of the accepted formats
    #[error("string value '{0}' is not a valid date format")]
    InvalidFormat(String),

    /// The value has a type that cannot represent a timestamp
    #[error("'{0}' cannot be converted to a timestamp")]
    Unconvertible(String),
}

/// Core error type for babylog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A start/end cell could not be parsed
    #[error("Record {record}, column '{column}': {source}")]
    Timestamp {
        record: usize,
        column: String,
        #[source]
        source: TimestampError,
    },

    /// A required column is absent or empty
    #[error("Record {record}: missing required field '{field}'")]
    MissingField { record: usize, field: String },

    /// Kind label outside the known set
    #[error("Record {record}: unknown event kind '{label}'")]
    UnknownKind { record: usize, label: String },

    /// Event ends before it starts
    #[error("Record {record}: end {end} is before start {start}")]
    InvalidInterval {
        record: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Field-alias table does not cover a surviving kind
    #[error("Alias table error: {0}")]
    AliasCoverage(String),
}
