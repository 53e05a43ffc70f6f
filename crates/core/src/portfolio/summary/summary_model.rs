use chrono::NaiveDate;
use portfolio_agent_market_data::rounding::serialize_rounded;
use portfolio_agent_market_data::MarketSnapshot;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::holdings::RecurringInvestment;

/// A holding valued at the run's market prices.
///
/// Figures are kept at full precision; the serializer rounds currency and
/// percentage fields to two places.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub ticker: String,
    pub name: String,
    pub shares: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub avg_cost: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub current_price: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub market_value: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub cost_basis: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub gain_loss: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub gain_pct: Decimal,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip)]
    pub cash_equivalent: bool,
    /// Market observations, flattened into the position's JSON object
    #[serde(flatten)]
    pub snapshot: MarketSnapshot,
    /// Share of total portfolio value, filled in once all positions are known
    #[serde(serialize_with = "serialize_rounded")]
    pub weight_pct: Decimal,
}

/// A holding left out of the summary, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHolding {
    pub ticker: String,
    pub reason: String,
}

/// Portfolio state for one run, as sent to the analysis step.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_rounded")]
    pub total_value: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub total_cost: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub total_gain_loss: Decimal,
    #[serde(serialize_with = "serialize_rounded")]
    pub total_gain_pct: Decimal,
    pub positions: Vec<Position>,
    pub recurring_investments: Vec<RecurringInvestment>,
    #[serde(skip)]
    pub skipped: Vec<SkippedHolding>,
}

impl PortfolioSummary {
    /// Pretty-printed JSON payload for the analysis request.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.ticker == ticker)
    }
}
