//! Error types for the report converter.

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while decoding input or writing the report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line does not have the fixed record length
    #[error("Incorrect input data: expected {expected} characters, found {actual}")]
    LineLength { expected: usize, actual: usize },

    /// Line holds invalid UTF-8 or non-ASCII characters
    #[error("Incorrect input data: line is not ASCII text")]
    NotAscii,

    /// A fixed-width field does not fall on character boundaries
    #[error("Incorrect input data: {field} field is not on a character boundary")]
    FieldBoundary { field: &'static str },

    /// Amount or timestamp field holds non-digit characters
    #[error("Incorrect {field} data: {value:?} is not a decimal number")]
    InvalidNumber { field: &'static str, value: String },

    /// Running total no longer fits the amount type
    #[error("Transaction sum overflowed")]
    AmountOverflow,

    /// Missing input or output path argument
    #[error("Missing file argument. Usage: card-report <input> <output>")]
    MissingArgument,
}
