//! Fan-out of one report to every enabled channel.

use log::{error, info};
use portfolio_agent_core::PortfolioSummary;

use crate::channel::DeliveryChannel;
use crate::config::DeliveryConfig;
use crate::email::{EmailChannel, EMAIL_CHANNEL};
use crate::error::DeliveryError;
use crate::local::LocalFileChannel;
use crate::notion::{NotionChannel, NOTION_CHANNEL};
use crate::webhook::{WebhookChannel, WEBHOOK_CHANNEL};

/// What happened on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Delivered; the string says where.
    Delivered(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub channel: &'static str,
    pub status: OutcomeStatus,
}

impl ChannelOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Delivered(_))
    }
}

enum Slot {
    Ready(Box<dyn DeliveryChannel>),
    /// Enabled, but could not be built from its settings
    Misconfigured { channel: &'static str, reason: String },
}

/// Delivers a report to each channel in turn. A failure on one channel is
/// logged and reported without affecting the others.
pub struct Dispatcher {
    slots: Vec<Slot>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn DeliveryChannel>>) -> Self {
        Self {
            slots: channels.into_iter().map(Slot::Ready).collect(),
        }
    }

    /// Build the enabled channels in order: local file, email, chat webhook,
    /// Notion. An enabled channel with bad settings is kept as a failure so
    /// it shows up in the outcomes.
    pub fn from_config(config: &DeliveryConfig) -> Self {
        let mut slots = Vec::new();

        if config.local.enabled {
            slots.push(Slot::Ready(Box::new(LocalFileChannel::from_config(&config.local))));
        }
        if config.email.enabled {
            slots.push(build(EMAIL_CHANNEL, EmailChannel::from_config(&config.email)));
        }
        if config.webhook.enabled {
            slots.push(build(WEBHOOK_CHANNEL, WebhookChannel::from_config(&config.webhook)));
        }
        if config.notion.enabled {
            slots.push(build(NOTION_CHANNEL, NotionChannel::from_config(&config.notion)));
        }

        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Ready(channel) => channel.name(),
                Slot::Misconfigured { channel, .. } => *channel,
            })
            .collect()
    }

    pub async fn dispatch(&self, report: &str, summary: &PortfolioSummary) -> Vec<ChannelOutcome> {
        let mut outcomes = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let outcome = match slot {
                Slot::Ready(channel) => match channel.deliver(report, summary).await {
                    Ok(location) => {
                        info!("Delivered report via {}: {}", channel.name(), location);
                        ChannelOutcome {
                            channel: channel.name(),
                            status: OutcomeStatus::Delivered(location),
                        }
                    }
                    Err(e) => {
                        error!("Delivery via {} failed: {}", channel.name(), e);
                        ChannelOutcome {
                            channel: channel.name(),
                            status: OutcomeStatus::Failed(e.to_string()),
                        }
                    }
                },
                Slot::Misconfigured { channel, reason } => {
                    error!("Delivery via {} skipped: {}", channel, reason);
                    ChannelOutcome {
                        channel: *channel,
                        status: OutcomeStatus::Failed(reason.clone()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

fn build<C>(channel: &'static str, result: Result<C, DeliveryError>) -> Slot
where
    C: DeliveryChannel + 'static,
{
    match result {
        Ok(built) => Slot::Ready(Box::new(built)),
        Err(e) => Slot::Misconfigured {
            channel,
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmailConfig, WebhookConfig};
    use crate::error::DeliveryResult;
    use crate::local::LOCAL_FILE_CHANNEL;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockChannel {
        name: &'static str,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DeliveryChannel for MockChannel {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn deliver(&self, _report: &str, _summary: &PortfolioSummary) -> DeliveryResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DeliveryError::Internal("boom".to_string()))
            } else {
                Ok(format!("{}-ok", self.name))
            }
        }
    }

    fn mock(name: &'static str, fail: bool, calls: &Arc<AtomicUsize>) -> Box<dyn DeliveryChannel> {
        Box::new(MockChannel {
            name,
            fail,
            calls: calls.clone(),
        })
    }

    fn summary() -> PortfolioSummary {
        PortfolioSummary {
            date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            total_value: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_gain_loss: Decimal::ZERO,
            total_gain_pct: Decimal::ZERO,
            positions: vec![],
            recurring_investments: vec![],
            skipped: vec![],
        }
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new(vec![
            mock("a", false, &calls),
            mock("b", true, &calls),
            mock("c", false, &calls),
        ]);

        let outcomes = dispatcher.dispatch("report", &summary()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, OutcomeStatus::Delivered("a-ok".to_string()));
        assert!(matches!(outcomes[1].status, OutcomeStatus::Failed(ref m) if m.contains("boom")));
        assert!(outcomes[2].is_success());
    }

    #[test]
    fn test_from_config_builds_only_enabled_channels() {
        let dispatcher = Dispatcher::from_config(&DeliveryConfig::default());
        assert_eq!(dispatcher.channel_names(), vec![LOCAL_FILE_CHANNEL]);

        let mut config = DeliveryConfig::default();
        config.local.enabled = false;
        assert!(Dispatcher::from_config(&config).is_empty());
    }

    #[tokio::test]
    async fn test_misconfigured_channel_reports_failure() {
        let mut config = DeliveryConfig::default();
        config.local.enabled = false;
        config.email = EmailConfig {
            enabled: true,
            ..Default::default()
        };
        config.webhook = WebhookConfig {
            enabled: true,
            url: None,
        };

        let dispatcher = Dispatcher::from_config(&config);
        assert_eq!(dispatcher.channel_names(), vec![EMAIL_CHANNEL, WEBHOOK_CHANNEL]);

        let outcomes = dispatcher.dispatch("report", &summary()).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.is_success()));
        assert!(matches!(outcomes[0].status, OutcomeStatus::Failed(ref m) if m.contains("misconfigured")));
    }
}
