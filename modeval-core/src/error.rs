//! Structured error types for modeval.

use std::fmt;

use thiserror::Error;

/// Unified error type for all modeval operations.
#[derive(Debug, Error)]
pub enum ModevalError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input row: non-numeric field, wrong column count.
    ///
    /// `line` is the 1-based line in the source file (the header is line 1).
    #[error("line {line}: {reason} (row: {raw:?})")]
    Ingestion {
        line: u64,
        raw: String,
        reason: String,
    },

    /// Parse error with no row to attribute it to (bad quoting, bad UTF-8).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input: out-of-range labels, length mismatch, empty dataset.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input is well-formed but the metric is undefined for it
    /// (e.g. AUC with no positive examples).
    #[error("degenerate input: {0}")]
    Degenerate(String),
}

impl ModevalError {
    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::Io(_) | Self::Ingestion { .. } | Self::Parse(_) => ErrorStage::Ingestion,
            Self::InvalidInput(_) => ErrorStage::Validation,
            Self::Degenerate(_) => ErrorStage::Computation,
        }
    }
}

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// Reading and parsing the input file.
    Ingestion,
    /// Checking labels, lengths and probability ranges.
    Validation,
    /// Computing a metric that is undefined for the given data.
    Computation,
}

impl fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ingestion => "ingestion",
            Self::Validation => "validation",
            Self::Computation => "computation",
        })
    }
}

/// Convenience alias used throughout modeval.
pub type Result<T> = std::result::Result<T, ModevalError>;
