//! Analysis requester: one completion round trip per run.

use async_trait::async_trait;
use log::{debug, info};
use portfolio_agent_core::PortfolioSummary;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::anthropic};

use crate::credential::ApiCredential;
use crate::error::AiError;
use crate::prompt::{build_user_message, SYSTEM_PROMPT};

/// Default model for the analysis.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Output token ceiling for the analysis.
pub const DEFAULT_MAX_TOKENS: u64 = 4096;

// ============================================================================
// Completion Backend Trait
// ============================================================================

/// A single system + user prompt completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u64,
}

/// Seam between the requester and the language-model provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Send the request and return the model's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}

// ============================================================================
// Anthropic Backend
// ============================================================================

/// Anthropic messages API via rig-core.
pub struct AnthropicBackend {
    client: anthropic::Client<HttpClient>,
    model: String,
}

impl AnthropicBackend {
    pub fn new(credential: &ApiCredential, model: impl Into<String>) -> Result<Self, AiError> {
        let client: anthropic::Client<HttpClient> = anthropic::Client::new(credential.expose())
            .map_err(|e| AiError::provider(e.to_string()))?;
        Ok(Self {
            client,
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.client
            .agent(&self.model)
            .preamble(&request.system)
            .max_tokens(request.max_tokens)
            .build()
            .prompt(&request.user)
            .await
            .map_err(|e| AiError::provider(e.to_string()))
    }
}

// ============================================================================
// Portfolio Analyst
// ============================================================================

/// Turns a [`PortfolioSummary`] into a markdown analysis.
///
/// No retries: any provider error is returned to the caller, and an empty
/// answer counts as an error.
pub struct PortfolioAnalyst<B> {
    backend: B,
    max_tokens: u64,
}

impl<B: CompletionBackend> PortfolioAnalyst<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Request the analysis for `summary`.
    pub async fn request_analysis(&self, summary: &PortfolioSummary) -> Result<String, AiError> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.trim().to_string(),
            user: build_user_message(summary)?,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting analysis from {} ({} prompt chars)",
            self.backend.model(),
            request.user.len()
        );

        let response = self.backend.complete(&request).await?;
        if response.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        info!(
            "Received analysis from {} ({} chars)",
            self.backend.model(),
            response.len()
        );
        Ok(response)
    }
}
