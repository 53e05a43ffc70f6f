//! Yahoo Finance market data provider.
//!
//! Two endpoints are used:
//! - quoteSummary (price, summaryDetail, financialData, defaultKeyStatistics)
//!   for the current price candidates, valuation and analyst fields
//! - the chart endpoint, via `yahoo_finance_api`, for daily closes

mod models;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use reqwest::header;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{HistoryRange, Quote, QuoteSummary};
use crate::provider::MarketDataProvider;

use models::{YahooPriceDetail, YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,financialData,defaultKeyStatistics";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
///
/// Holds the authentication crumb for the lifetime of the provider, so a run
/// performs the cookie/crumb handshake at most once unless Yahoo rejects it.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = self.fetch_crumb().await?;
        *self.crumb.write().await = Some(crumb.clone());
        Ok(crumb)
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e))
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e))
            })?
            .text()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e))
            })?;

        Ok(CrumbData { cookie, crumb })
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Convert a Yahoo chart quote to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: &yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        // Close price is required
        let close = to_decimal(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote::new(timestamp, close))
    }
}

/// Map a quoteSummary result onto the provider-neutral summary.
fn map_quote_summary(symbol: &str, result: &YahooQuoteSummaryResult) -> QuoteSummary {
    let price = result.price.as_ref();
    let detail = result.summary_detail.as_ref();
    let financial = result.financial_data.as_ref();
    let stats = result.default_key_statistics.as_ref();

    QuoteSummary {
        symbol: symbol.to_string(),
        current_price: raw(financial.and_then(|f| f.current_price.as_ref())),
        regular_market_price: raw(price.and_then(|p| p.regular_market_price.as_ref())),
        nav_price: raw(detail.and_then(|d| d.nav_price.as_ref())),
        previous_close: raw(detail.and_then(|d| d.previous_close.as_ref()))
            .or_else(|| raw(price.and_then(|p| p.regular_market_previous_close.as_ref()))),
        fifty_two_week_high: raw(detail.and_then(|d| d.fifty_two_week_high.as_ref())),
        fifty_two_week_low: raw(detail.and_then(|d| d.fifty_two_week_low.as_ref())),
        trailing_pe: raw(detail.and_then(|d| d.trailing_pe.as_ref())),
        forward_pe: raw(detail.and_then(|d| d.forward_pe.as_ref()))
            .or_else(|| raw(stats.and_then(|s| s.forward_pe.as_ref()))),
        target_low_price: raw(financial.and_then(|f| f.target_low_price.as_ref())),
        target_mean_price: raw(financial.and_then(|f| f.target_mean_price.as_ref())),
        target_high_price: raw(financial.and_then(|f| f.target_high_price.as_ref())),
        recommendation_key: financial
            .and_then(|f| f.recommendation_key.clone())
            .filter(|key| !key.is_empty() && key != "none"),
    }
}

fn raw(detail: Option<&YahooPriceDetail>) -> Option<Decimal> {
    detail.and_then(|d| d.raw).and_then(to_decimal)
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote_summary(&self, symbol: &str) -> Result<QuoteSummary, MarketDataError> {
        debug!("Fetching quote summary for {} from Yahoo", symbol);

        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            encode(symbol),
            QUOTE_SUMMARY_MODULES,
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Quote summary request failed: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb().await;
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Yahoo authentication expired",
            ));
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to parse quote summary response: {}", e),
            )
        })?;

        if let Some(error) = data.quote_summary.error.as_ref() {
            debug!(
                "Yahoo quoteSummary error for {}: {:?} {:?}",
                symbol, error.code, error.description
            );
        }

        let result = data
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_quote_summary(symbol, &result))
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!(
            "Fetching {} of daily history for {} from Yahoo",
            range.as_yahoo_range(),
            symbol
        );

        let response = self
            .connector
            .get_quote_range(symbol, "1d", range.as_yahoo_range())
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::provider(PROVIDER_ID, e.to_string())
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let mut quotes: Vec<Quote> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match Self::yahoo_quote_to_quote(q) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping quote due to conversion error: {:?}", e);
                            None
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                quotes.sort_by_key(|q| q.timestamp);
                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' over {}",
                    symbol,
                    range.as_yahoo_range()
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::provider(PROVIDER_ID, e.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
