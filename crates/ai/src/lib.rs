//! Portfolio Agent AI - analysis requests using rig-core.
//!
//! Sends the portfolio summary to a language model with a fixed analyst
//! persona and returns the markdown report.
//!
//! # Architecture
//!
//! - `credential`: API key loading and validation
//! - `prompt`: System prompt and user message construction
//! - `analyst`: `CompletionBackend` seam, the rig-core Anthropic backend and
//!   the `PortfolioAnalyst` requester
//! - `error`: `AiError`
//!
//! # Example
//!
//! ```ignore
//! use portfolio_agent_ai::{AnthropicBackend, ApiCredential, PortfolioAnalyst, DEFAULT_MODEL};
//!
//! let credential = ApiCredential::from_env()?;
//! let analyst = PortfolioAnalyst::new(AnthropicBackend::new(&credential, DEFAULT_MODEL)?);
//! let report = analyst.request_analysis(&summary).await?;
//! ```

pub mod analyst;
pub mod credential;
pub mod error;
pub mod prompt;

pub use analyst::{
    AnthropicBackend, CompletionBackend, CompletionRequest, PortfolioAnalyst, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL,
};
pub use credential::{ApiCredential, ANTHROPIC_API_KEY_ENV};
pub use error::AiError;
pub use prompt::{build_user_message, SYSTEM_PROMPT};
