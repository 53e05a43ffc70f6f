//! Delivery error types.

use thiserror::Error;

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Delivery error type.
///
/// Errors are isolated per channel: the dispatcher logs them and moves on.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The channel is enabled but a required setting is missing or invalid.
    #[error("{channel} is enabled but misconfigured: {message}")]
    Config {
        channel: &'static str,
        message: String,
    },

    #[error("File write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status.
    #[error("{channel} returned HTTP {status}: {body}")]
    Status {
        channel: &'static str,
        status: u16,
        body: String,
    },

    #[error("Email send failed: {0}")]
    Email(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeliveryError {
    pub fn config(channel: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            channel,
            message: message.into(),
        }
    }
}
