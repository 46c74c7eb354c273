use std::path::PathBuf;

use thiserror::Error;

/// Field-level validation errors raised when building records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item name cannot be empty")]
    EmptyName,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be a whole number")]
    FractionalValue { field: &'static str },
    #[error("field '{field}' is too large")]
    OutOfRange { field: &'static str },

    #[error("timestamp must look like YYYY-MM-DD HH:MM: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Errors that can occur while loading, mutating or persisting the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A persisted row could be parsed but not turned into a record.
    #[error("{}: data row {row} is malformed: {source}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: u64,
        source: ValidationError,
    },
}
