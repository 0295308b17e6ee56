//! Error types for the roster crate.

use thiserror::Error;

/// Errors that can occur when building, evaluating or exporting queries.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The query's pagination parameters are unusable (zero page or page size).
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: &'static str },

    /// Strict sorting was requested over keys that cannot be compared.
    #[error("cannot sort by '{field}': {reason}")]
    UnsupportedSortField { field: String, reason: String },

    /// The page size is not one of the sizes the table offers.
    #[error("page size {size} is not allowed (expected one of {allowed:?})")]
    PageSizeNotAllowed { size: usize, allowed: Vec<usize> },

    /// Writing CSV output failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// CSV output was not valid UTF-8.
    #[error("CSV export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Table configuration could not be parsed.
    #[error("invalid table configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Table configuration parsed but is inconsistent.
    #[error("invalid table configuration: {0}")]
    ConfigValue(String),
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RosterError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RosterError::Csv(err.into_error().into())
    }
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
