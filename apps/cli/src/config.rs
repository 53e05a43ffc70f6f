use std::path::PathBuf;

use anyhow::{Context, Result};
use portfolio_agent_ai::{ANTHROPIC_API_KEY_ENV, DEFAULT_MODEL};
use portfolio_agent_delivery::config::{DEFAULT_OUTPUT_DIR, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use portfolio_agent_delivery::{
    DeliveryConfig, EmailConfig, LocalFileConfig, NotionConfig, WebhookConfig,
};

pub struct Config {
    /// Raw key; validated at startup before any network call
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub delivery: DeliveryConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let toggle = |key: &str, default: bool| var(key).map(|v| parse_toggle(&v)).unwrap_or(default);

        let smtp_port = match var("SMTP_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid SMTP_PORT: {}", port))?,
            None => DEFAULT_SMTP_PORT,
        };

        let delivery = DeliveryConfig {
            local: LocalFileConfig {
                enabled: toggle("PORTFOLIO_AGENT_SAVE_LOCAL", true),
                output_dir: PathBuf::from(
                    var("PORTFOLIO_AGENT_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into()),
                ),
            },
            email: EmailConfig {
                enabled: toggle("PORTFOLIO_AGENT_SEND_EMAIL", false),
                smtp_host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.into()),
                smtp_port,
                username: var("SMTP_USER"),
                password: var("SMTP_PASS"),
                from: var("EMAIL_FROM"),
                to: var("EMAIL_TO"),
            },
            webhook: WebhookConfig {
                enabled: toggle("PORTFOLIO_AGENT_SEND_SLACK", false),
                url: var("SLACK_WEBHOOK_URL"),
            },
            notion: NotionConfig {
                enabled: toggle("PORTFOLIO_AGENT_POST_NOTION", false),
                api_key: var("NOTION_API_KEY"),
                database_id: var("NOTION_DATABASE_ID"),
                ..Default::default()
            },
        };

        Ok(Self {
            anthropic_api_key: var(ANTHROPIC_API_KEY_ENV),
            model: var("PORTFOLIO_AGENT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            delivery,
        })
    }
}

fn parse_toggle(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
