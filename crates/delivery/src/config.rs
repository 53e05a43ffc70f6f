//! Per-channel delivery settings.
//!
//! Each channel has a toggle and its own settings. Settings are optional so a
//! disabled channel needs nothing; an enabled channel with a missing setting
//! fails when the dispatcher builds it.

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "reports";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileConfig {
    pub enabled: bool,
    pub output_dir: PathBuf,
}

impl Default for LocalFileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            from: None,
            to: None,
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Chat incoming-webhook settings. The URL is itself the secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("enabled", &self.enabled)
            .field("url", &self.url.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct NotionConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub base_url: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            database_id: None,
            base_url: DEFAULT_NOTION_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// All channel settings, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub local: LocalFileConfig,
    pub email: EmailConfig,
    pub webhook: WebhookConfig,
    pub notion: NotionConfig,
}

/// Return the trimmed value, treating blank as missing.
pub(crate) fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeliveryConfig::default();
        assert!(config.local.enabled);
        assert_eq!(config.local.output_dir, PathBuf::from("reports"));
        assert!(!config.email.enabled);
        assert_eq!(config.email.smtp_host, "smtp.gmail.com");
        assert_eq!(config.email.smtp_port, 587);
        assert!(!config.webhook.enabled);
        assert!(!config.notion.enabled);
        assert_eq!(config.notion.base_url, "https://api.notion.com");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = DeliveryConfig {
            email: EmailConfig {
                password: Some("hunter2".to_string()),
                ..Default::default()
            },
            webhook: WebhookConfig {
                enabled: true,
                url: Some("https://hooks.slack.com/services/T/B/secret".to_string()),
            },
            notion: NotionConfig {
                api_key: Some("secret_abc".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("hooks.slack.com"));
        assert!(!debug.contains("secret_abc"));
    }

    #[test]
    fn test_required_treats_blank_as_missing() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some("  ".to_string())), None);
        assert_eq!(required(&Some(" x ".to_string())), Some("x"));
    }
}
