//! Price fallback chain.
//!
//! Providers expose several overlapping price fields and none is reliably
//! present for every instrument: equities carry a live price, mutual funds a
//! NAV, thinly traded symbols sometimes only a previous close. The chain
//! evaluates named rules in order and the first rule that yields a positive
//! value wins.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{Quote, QuoteSummary};

/// Minimum history samples before the latest close is trusted as a price.
const MIN_HISTORY_SAMPLES: usize = 2;

/// A named rule in the price fallback chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PriceSource {
    /// Live trade price
    LivePrice,
    /// Regular-session market price
    MarketPrice,
    /// Fund net asset value
    FundNav,
    /// Previous session close
    PreviousClose,
    /// Most recent close in the fetched history
    LatestClose,
}

impl PriceSource {
    /// Stable identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PriceSource::LivePrice => "live_price",
            PriceSource::MarketPrice => "market_price",
            PriceSource::FundNav => "fund_nav",
            PriceSource::PreviousClose => "previous_close",
            PriceSource::LatestClose => "latest_close",
        }
    }

    /// Apply this rule to the fetched data.
    pub fn pick(&self, summary: Option<&QuoteSummary>, history: &[Quote]) -> Option<Decimal> {
        let value = match self {
            PriceSource::LivePrice => summary.and_then(|s| s.current_price),
            PriceSource::MarketPrice => summary.and_then(|s| s.regular_market_price),
            PriceSource::FundNav => summary.and_then(|s| s.nav_price),
            PriceSource::PreviousClose => summary.and_then(|s| s.previous_close),
            PriceSource::LatestClose => {
                if history.len() >= MIN_HISTORY_SAMPLES {
                    history.last().map(|q| q.close)
                } else {
                    None
                }
            }
        };
        // Providers report missing prices as zero often enough that a zero is
        // treated as absent.
        value.filter(|price| *price > Decimal::ZERO)
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A price together with the rule that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPrice {
    pub price: Decimal,
    pub source: PriceSource,
}

/// Ordered list of price rules; the first success wins.
#[derive(Clone, Debug)]
pub struct PriceFallbackChain {
    rules: Vec<PriceSource>,
}

impl PriceFallbackChain {
    /// Default order: live price, market price, fund NAV, previous close,
    /// latest historical close.
    pub fn new() -> Self {
        Self::with_rules(vec![
            PriceSource::LivePrice,
            PriceSource::MarketPrice,
            PriceSource::FundNav,
            PriceSource::PreviousClose,
            PriceSource::LatestClose,
        ])
    }

    /// Create a chain with a custom rule order.
    pub fn with_rules(rules: Vec<PriceSource>) -> Self {
        Self { rules }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[PriceSource] {
        &self.rules
    }

    /// Evaluate the rules in order.
    pub fn resolve(&self, summary: Option<&QuoteSummary>, history: &[Quote]) -> Option<ResolvedPrice> {
        self.rules.iter().find_map(|rule| {
            rule.pick(summary, history)
                .map(|price| ResolvedPrice { price, source: *rule })
        })
    }
}

impl Default for PriceFallbackChain {
    fn default() -> Self {
        Self::new()
    }
}
