//! Email channel.
//!
//! Sends the report as a multipart/alternative message with a plain-text
//! part over SMTP with STARTTLS. lettre's SMTP transport is blocking, so the
//! send runs on the blocking pool and is awaited before returning.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;
use portfolio_agent_core::PortfolioSummary;

use crate::channel::DeliveryChannel;
use crate::config::{required, EmailConfig};
use crate::error::{DeliveryError, DeliveryResult};
use crate::format::report_title;

pub const EMAIL_CHANNEL: &str = "email";

pub struct EmailChannel {
    smtp_host: String,
    smtp_port: u16,
    credentials: Credentials,
    from: Mailbox,
    to: Mailbox,
}

impl std::fmt::Debug for EmailChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailChannel")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl EmailChannel {
    /// Build the channel, checking every required setting and address.
    pub fn from_config(config: &EmailConfig) -> DeliveryResult<Self> {
        let missing = |name: &str| DeliveryError::config(EMAIL_CHANNEL, format!("{} is not set", name));

        let smtp_host = config.smtp_host.trim();
        if smtp_host.is_empty() {
            return Err(missing("SMTP host"));
        }
        let username = required(&config.username).ok_or_else(|| missing("SMTP user"))?;
        let password = required(&config.password).ok_or_else(|| missing("SMTP password"))?;
        let from = parse_mailbox("sender", required(&config.from).ok_or_else(|| missing("sender address"))?)?;
        let to = parse_mailbox("recipient", required(&config.to).ok_or_else(|| missing("recipient address"))?)?;

        Ok(Self {
            smtp_host: smtp_host.to_string(),
            smtp_port: config.smtp_port,
            credentials: Credentials::new(username.to_string(), password.to_string()),
            from,
            to,
        })
    }

    /// Assemble the message for a report.
    pub fn build_message(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(report_title(summary.date))
            .multipart(MultiPart::alternative().singlepart(SinglePart::plain(report.to_string())))
            .map_err(|e| DeliveryError::Email(format!("Failed to build email: {}", e)))
    }

    fn create_smtp_transport(&self) -> DeliveryResult<SmtpTransport> {
        let transport = SmtpTransport::starttls_relay(&self.smtp_host)
            .map_err(|e| DeliveryError::Email(format!("SMTP setup failed: {}", e)))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build();
        Ok(transport)
    }
}

fn parse_mailbox(role: &str, address: &str) -> DeliveryResult<Mailbox> {
    address
        .parse()
        .map_err(|e| DeliveryError::config(EMAIL_CHANNEL, format!("Invalid {} address: {}", role, e)))
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn name(&self) -> &'static str {
        EMAIL_CHANNEL
    }

    async fn deliver(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<String> {
        let email = self.build_message(report, summary)?;
        let transport = self.create_smtp_transport()?;

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| DeliveryError::Internal(format!("Email task failed: {}", e)))?
            .map_err(|e| DeliveryError::Email(format!("SMTP send failed: {}", e)))?;

        info!("Email sent to {}", self.to);
        Ok(self.to.to_string())
    }
}
