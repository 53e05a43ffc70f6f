//! Channel trait for report delivery.

use async_trait::async_trait;
use portfolio_agent_core::PortfolioSummary;

use crate::error::DeliveryResult;

/// A destination for the finished report.
///
/// Implement this trait to add a new delivery channel.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Get the channel name.
    fn name(&self) -> &'static str;

    /// Deliver the report. Returns a short description of where it went.
    async fn deliver(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<String>;
}
