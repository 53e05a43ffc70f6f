//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{HistoryRange, Quote, QuoteSummary};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use portfolio_agent_market_data::provider::MarketDataProvider;
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement quote methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the current quote fields for a symbol.
    ///
    /// Implementations return whatever subset of [`QuoteSummary`] the
    /// provider knows; missing fields stay `None`.
    async fn get_quote_summary(&self, symbol: &str) -> Result<QuoteSummary, MarketDataError>;

    /// Fetch daily closes over a trailing window.
    ///
    /// The quotes should be ordered by timestamp ascending.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
