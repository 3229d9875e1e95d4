use thiserror::Error;

use crate::IsoDate;

/// Validation and contract errors exposed by `earnlens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("quote history contains {date} more than once")]
    DuplicateQuoteDate { date: IsoDate },
    #[error("disclosure list contains {date} more than once")]
    DuplicateDisclosureDate { date: IsoDate },

    #[error("invalid provider '{value}', expected one of alphavantage, edgar, yahoo")]
    InvalidProvider { value: String },
}

/// A quote field that should carry a decimal number does not parse as one.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("quote field '{field}' on {date} is not numeric: '{value}'")]
pub struct DataFormatError {
    pub date: IsoDate,
    pub field: &'static str,
    pub value: String,
}

/// The exact-date join matched fewer rows than there are disclosure dates.
///
/// Signals upstream inconsistency (for example a disclosure history that
/// predates the available price history). No partial table is produced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "alignment matched {closes_matched} closes and {returns_matched} returns \
     for {expected} disclosure dates"
)]
pub struct AlignmentMismatchError {
    pub expected: usize,
    pub closes_matched: usize,
    pub returns_matched: usize,
}

/// No realized returns were left after filtering placeholder and missing rows.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no realized returns available to summarize")]
pub struct InsufficientDataError;

/// Failures of the trailing 52-week range computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),
}

/// Top-level error type for core pipeline operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    AlignmentMismatch(#[from] AlignmentMismatchError),

    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
