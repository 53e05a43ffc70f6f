//! Chat incoming-webhook channel (Slack-compatible `{"text": ...}` payload).

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use portfolio_agent_core::PortfolioSummary;
use serde::Serialize;

use crate::channel::DeliveryChannel;
use crate::config::{required, WebhookConfig};
use crate::error::{DeliveryError, DeliveryResult};
use crate::format::report_title;

pub const WEBHOOK_CHANNEL: &str = "slack";

/// Longest message text sent, in characters, before the marker.
pub const WEBHOOK_TEXT_LIMIT: usize = 39_000;

pub const TRUNCATION_MARKER: &str = "\n\n_(truncated)_";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Message text for a report, cut to [`WEBHOOK_TEXT_LIMIT`] characters with
/// [`TRUNCATION_MARKER`] appended when longer.
pub fn webhook_text(report: &str, date: NaiveDate) -> String {
    let text = format!("*{}*\n\n{}", report_title(date), report);
    match text.char_indices().nth(WEBHOOK_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text,
    }
}

pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    pub fn from_config(config: &WebhookConfig) -> DeliveryResult<Self> {
        let url = required(&config.url)
            .ok_or_else(|| DeliveryError::config(WEBHOOK_CHANNEL, "webhook URL is not set"))?;
        reqwest::Url::parse(url)
            .map_err(|e| DeliveryError::config(WEBHOOK_CHANNEL, format!("Invalid webhook URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeliveryError::Internal(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl DeliveryChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        WEBHOOK_CHANNEL
    }

    async fn deliver(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<String> {
        let text = webhook_text(report, summary.date);
        debug!("Posting {} chars to chat webhook", text.chars().count());

        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { text: &text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                channel: WEBHOOK_CHANNEL,
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        info!("Chat webhook message sent");
        Ok("webhook".to_string())
    }
}
