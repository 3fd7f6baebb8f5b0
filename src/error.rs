//! Error handling for stock CSV feed operations.
//!
//! Row-level failures are collected in [`RowError`]; every one of them is
//! fatal for the feed being loaded. [`Error`] wraps them with the location of
//! the offending row together with I/O, CSV and configuration failures.

use std::num::ParseFloatError;
use thiserror::Error;

/// A malformed input row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// Date text matched neither accepted format
    #[error("parse '{text}' error with either format.")]
    UnparseableDate { text: String },

    /// Numeric token could not be converted to a float
    #[error("invalid number for field '{field}': '{text}' ({source})")]
    InvalidNumber {
        field: &'static str,
        text: String,
        #[source]
        source: ParseFloatError,
    },

    /// Row ran out of tokens before every consumed field was read
    #[error("missing token for field '{field}' at position {position}")]
    MissingField { field: &'static str, position: usize },
}

impl RowError {
    /// Create an unparseable date error
    pub fn unparseable_date(text: impl Into<String>) -> Self {
        Self::UnparseableDate { text: text.into() }
    }

    /// Create an invalid number error
    pub fn invalid_number(
        field: &'static str,
        text: impl Into<String>,
        source: ParseFloatError,
    ) -> Self {
        Self::InvalidNumber {
            field,
            text: text.into(),
            source,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &'static str, position: usize) -> Self {
        Self::MissingField { field, position }
    }

    /// Whether this is the double date-format failure
    pub fn is_unparseable_date(&self) -> bool {
        matches!(self, Self::UnparseableDate { .. })
    }

    /// Name of the field the row failed on
    pub fn field(&self) -> &'static str {
        match self {
            Self::UnparseableDate { .. } => "date",
            Self::InvalidNumber { field, .. } | Self::MissingField { field, .. } => field,
        }
    }
}

/// Comprehensive error types for feed loading operations
#[derive(Error, Debug)]
pub enum Error {
    /// A row could not be parsed; loading stops here
    #[error("malformed row at {source_name}:{line}: {source}")]
    MalformedRow {
        source_name: String,
        line: u64,
        #[source]
        source: RowError,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizer error
    #[error("CSV error in '{source_name}': {message}")]
    Csv {
        source_name: String,
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date number outside the representable calendar range
    #[error("Date number out of range: {value}")]
    DateNumOutOfRange { value: f64 },
}

impl Error {
    /// Create a malformed row error with its location
    pub fn malformed_row(source_name: impl Into<String>, line: u64, source: RowError) -> Self {
        Self::MalformedRow {
            source_name: source_name.into(),
            line,
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: csv::Error,
    ) -> Self {
        Self::Csv {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date number range error
    pub fn datenum_out_of_range(value: f64) -> Self {
        Self::DateNumOutOfRange { value }
    }

    /// The row error behind this failure, if any
    pub fn row_error(&self) -> Option<&RowError> {
        match self {
            Self::MalformedRow { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            source_name: "unknown".to_string(),
            message: "CSV tokenizing failed".to_string(),
            source: error,
        }
    }
}

/// Result type alias for the stock CSV feed
pub type Result<T> = std::result::Result<T, Error>;
