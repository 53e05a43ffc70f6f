//! Per-ticker snapshot fetching.
//!
//! [`SnapshotFetcher`] queries a provider for the quote summary and a
//! three-month daily history, resolves the price through the
//! [`PriceFallbackChain`], and computes trailing returns. The result is a
//! best-effort [`MarketSnapshot`]: one failed call still yields whatever the
//! other call returned.

mod returns;

pub use returns::{trailing_returns, TrailingReturns, ONE_MONTH_SAMPLES, THREE_MONTH_SAMPLES};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{HistoryRange, MarketSnapshot, Quote, QuoteSummary};
use crate::price::PriceFallbackChain;
use crate::provider::MarketDataProvider;

/// Source of market snapshots, as seen by the portfolio aggregator.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch a snapshot for `ticker`, querying `lookup_symbol` instead when
    /// the provider knows the instrument under a different symbol.
    async fn fetch_snapshot(
        &self,
        ticker: &str,
        lookup_symbol: Option<&str>,
    ) -> Result<MarketSnapshot, MarketDataError>;
}

/// Builds snapshots from a [`MarketDataProvider`].
pub struct SnapshotFetcher<P> {
    provider: P,
    price_chain: PriceFallbackChain,
    history_range: HistoryRange,
}

impl<P: MarketDataProvider> SnapshotFetcher<P> {
    /// Create a fetcher with the default price chain and a 3-month history.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            price_chain: PriceFallbackChain::new(),
            history_range: HistoryRange::ThreeMonths,
        }
    }

    /// Replace the price fallback chain.
    pub fn with_price_chain(mut self, price_chain: PriceFallbackChain) -> Self {
        self.price_chain = price_chain;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Resolve the symbol to query: the override wins when it is non-blank.
pub fn effective_symbol<'a>(ticker: &'a str, lookup_symbol: Option<&'a str>) -> &'a str {
    lookup_symbol
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ticker)
}

/// Assemble a snapshot from whatever the provider returned.
pub fn build_snapshot(
    summary: Option<&QuoteSummary>,
    history: &[Quote],
    price_chain: &PriceFallbackChain,
) -> MarketSnapshot {
    let resolved = price_chain.resolve(summary, history);
    let closes: Vec<_> = history.iter().map(|q| q.close).collect();
    let returns = trailing_returns(&closes);

    MarketSnapshot {
        price: resolved.map(|r| r.price),
        price_source: resolved.map(|r| r.source),
        high_52w: summary.and_then(|s| s.fifty_two_week_high),
        low_52w: summary.and_then(|s| s.fifty_two_week_low),
        pe_ratio: summary.and_then(|s| s.pe_ratio()),
        target_mean: summary.and_then(|s| s.target_mean_price),
        target_low: summary.and_then(|s| s.target_low_price),
        target_high: summary.and_then(|s| s.target_high_price),
        analyst_recommendation: summary.and_then(|s| s.recommendation_key.clone()),
        perf_1mo_pct: returns.one_month_pct,
        perf_3mo_pct: returns.three_month_pct,
        perf_window_days: returns.short_window.map(|w| w.days),
        perf_window_pct: returns.short_window.map(|w| w.pct),
    }
}

#[async_trait]
impl<P: MarketDataProvider> SnapshotSource for SnapshotFetcher<P> {
    async fn fetch_snapshot(
        &self,
        ticker: &str,
        lookup_symbol: Option<&str>,
    ) -> Result<MarketSnapshot, MarketDataError> {
        let symbol = effective_symbol(ticker, lookup_symbol);
        debug!(
            "Fetching snapshot for {} (symbol {}) from {}",
            ticker,
            symbol,
            self.provider.id()
        );

        let summary = self.provider.get_quote_summary(symbol).await;
        let history = self
            .provider
            .get_historical_quotes(symbol, self.history_range)
            .await;

        let (summary, history) = match (summary, history) {
            (Err(summary_err), Err(history_err)) => {
                debug!(
                    "Both quote summary and history failed for {}: {} / {}",
                    symbol, summary_err, history_err
                );
                return Err(summary_err);
            }
            (Ok(summary), Ok(history)) => (Some(summary), history),
            (Ok(summary), Err(e)) => {
                warn!("History unavailable for {}: {}", symbol, e);
                (Some(summary), Vec::new())
            }
            (Err(e), Ok(history)) => {
                warn!("Quote summary unavailable for {}: {}", symbol, e);
                (None, history)
            }
        };

        let snapshot = build_snapshot(summary.as_ref(), &history, &self.price_chain);
        if let Some(source) = snapshot.price_source {
            debug!("Resolved {} price from {}", symbol, source);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::PriceSource;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct FakeProvider {
        summary: Option<QuoteSummary>,
        closes: Vec<Decimal>,
        queried: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(summary: Option<QuoteSummary>, closes: Vec<Decimal>) -> Self {
            Self {
                summary,
                closes,
                queried: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for FakeProvider {
        fn id(&self) -> &'static str {
            "FAKE"
        }

        async fn get_quote_summary(&self, symbol: &str) -> Result<QuoteSummary, MarketDataError> {
            self.queried.lock().unwrap().push(symbol.to_string());
            self.summary
                .clone()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_historical_quotes(
            &self,
            _symbol: &str,
            range: HistoryRange,
        ) -> Result<Vec<Quote>, MarketDataError> {
            assert_eq!(range, HistoryRange::ThreeMonths);
            if self.closes.is_empty() {
                return Err(MarketDataError::NoDataForRange);
            }
            Ok(self
                .closes
                .iter()
                .map(|c| Quote::new(Utc::now(), *c))
                .collect())
        }
    }

    #[test]
    fn test_effective_symbol() {
        assert_eq!(effective_symbol("BTC", None), "BTC");
        assert_eq!(effective_symbol("BTC", Some("BTC-USD")), "BTC-USD");
        assert_eq!(effective_symbol("BTC", Some("  ")), "BTC");
    }

    #[tokio::test]
    async fn test_override_symbol_is_queried() {
        let mut summary = QuoteSummary::new("BTC-USD");
        summary.current_price = Some(dec!(97000));
        let fetcher = SnapshotFetcher::new(FakeProvider::new(Some(summary), vec![]));

        let snapshot = fetcher.fetch_snapshot("BTC", Some("BTC-USD")).await.unwrap();
        assert_eq!(snapshot.price, Some(dec!(97000)));
        assert_eq!(
            fetcher.provider().queried.lock().unwrap().as_slice(),
            &["BTC-USD".to_string()]
        );
    }

    #[tokio::test]
    async fn test_partial_snapshot_when_history_missing() {
        let mut summary = QuoteSummary::new("SPY");
        summary.regular_market_price = Some(dec!(600));
        summary.fifty_two_week_high = Some(dec!(613));
        summary.recommendation_key = Some("buy".to_string());
        let fetcher = SnapshotFetcher::new(FakeProvider::new(Some(summary), vec![]));

        let snapshot = fetcher.fetch_snapshot("SPY", None).await.unwrap();
        assert_eq!(snapshot.price, Some(dec!(600)));
        assert_eq!(snapshot.price_source, Some(PriceSource::MarketPrice));
        assert_eq!(snapshot.high_52w, Some(dec!(613)));
        assert_eq!(snapshot.analyst_recommendation.as_deref(), Some("buy"));
        assert_eq!(snapshot.perf_1mo_pct, None);
        assert_eq!(snapshot.perf_window_days, None);
    }

    #[tokio::test]
    async fn test_history_only_snapshot_uses_latest_close() {
        let fetcher = SnapshotFetcher::new(FakeProvider::new(
            None,
            vec![dec!(40), dec!(42), dec!(44)],
        ));

        let snapshot = fetcher.fetch_snapshot("FSPGX", None).await.unwrap();
        assert_eq!(snapshot.price, Some(dec!(44)));
        assert_eq!(snapshot.price_source, Some(PriceSource::LatestClose));
        assert_eq!(snapshot.perf_window_days, Some(2));
        assert_eq!(snapshot.perf_window_pct, Some(dec!(10)));
    }

    #[tokio::test]
    async fn test_both_calls_failing_is_an_error() {
        let fetcher = SnapshotFetcher::new(FakeProvider::new(None, vec![]));
        let err = fetcher.fetch_snapshot("ZZZZ", None).await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(ref s) if s == "ZZZZ"));
    }

    #[tokio::test]
    async fn test_no_price_yields_priceless_snapshot() {
        let mut summary = QuoteSummary::new("ODD");
        summary.trailing_pe = Some(dec!(12));
        let fetcher = SnapshotFetcher::new(FakeProvider::new(Some(summary), vec![]));

        let snapshot = fetcher.fetch_snapshot("ODD", None).await.unwrap();
        assert!(snapshot.price.is_none());
        assert_eq!(snapshot.pe_ratio, Some(dec!(12)));
    }
}
