//! Analysis error types.

use portfolio_agent_core::Error as CoreError;
use thiserror::Error;

/// Analysis request errors.
///
/// Every variant is fatal for the run: there is no report to deliver
/// without an analysis.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (from rig-core or API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model answered with no text.
    #[error("Provider returned an empty analysis")]
    EmptyResponse,

    /// Core error from portfolio-agent-core.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Error code for log lines and exit diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::EmptyResponse => "EMPTY_RESPONSE",
            AiError::Core(_) => "CORE_ERROR",
        }
    }
}
