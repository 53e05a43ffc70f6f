//! Core error types for the portfolio agent.

use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for holdings and aggregation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize portfolio summary: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation errors for the configured holdings.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Duplicate ticker in holdings: {0}")]
    DuplicateTicker(String),

    #[error("{field} for {ticker} must not be negative (got {value})")]
    NegativeValue {
        ticker: String,
        field: &'static str,
        value: Decimal,
    },
}
