//! Portfolio Agent Delivery - report fan-out.
//!
//! Channels:
//! - `local`: markdown file per report date
//! - `email`: SMTP with STARTTLS via lettre
//! - `webhook`: Slack-compatible incoming webhook
//! - `notion`: page in a Notion database
//!
//! The [`Dispatcher`] builds the enabled channels from a [`DeliveryConfig`]
//! and delivers to each in turn, isolating failures.

pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod email;
pub mod error;
pub mod format;
pub mod local;
pub mod notion;
pub mod webhook;

pub use channel::DeliveryChannel;
pub use config::{DeliveryConfig, EmailConfig, LocalFileConfig, NotionConfig, WebhookConfig};
pub use dispatcher::{ChannelOutcome, Dispatcher, OutcomeStatus};
pub use error::{DeliveryError, DeliveryResult};
pub use local::LOCAL_FILE_CHANNEL;
