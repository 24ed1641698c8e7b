//! Error types for performance accounting.

use thiserror::Error;

/// Top-level performance accounting error.
#[derive(Error, Debug)]
pub enum PerformanceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid update: {0}")]
    Update(#[from] UpdateError),

    #[error("Commission error: {0}")]
    Commission(#[from] CommissionError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Contract violations in the update feed.
///
/// An update rejected with one of these leaves the accumulator untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpdateError {
    #[error("Quantity must be nonzero")]
    ZeroQuantity,

    #[error("Average fill price must be positive and finite, got {0}")]
    InvalidPrice(f64),

    #[error("Mark price must be positive and finite, got {0}")]
    InvalidMarkPrice(f64),

    #[error("Out of order update: timestamp {timestamp} precedes {previous}")]
    OutOfOrder { previous: i64, timestamp: i64 },

    #[error("Position mismatch: {previous} + {quantity} != {resulting}")]
    PositionMismatch {
        previous: i64,
        quantity: i64,
        resulting: i64,
    },
}

/// Commission model failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommissionError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u64),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid commission amount: {0}")]
    InvalidAmount(f64),

    #[error("Commission schedule unavailable: {0}")]
    Unavailable(String),
}

/// Update feed errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Feed not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for performance accounting operations.
pub type PerformanceResult<T> = Result<T, PerformanceError>;
