use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current quote fields as reported by a provider.
///
/// Providers fill in whatever they have; nothing here is guaranteed. Several
/// fields overlap (a live price, the regular-market price, a fund NAV and the
/// previous close); [`crate::PriceFallbackChain`] decides which one becomes
/// the snapshot price.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Symbol the provider was queried with
    pub symbol: String,

    /// Live trade price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,

    /// Regular-session market price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_market_price: Option<Decimal>,

    /// Net asset value (mutual funds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_price: Option<Decimal>,

    /// Previous session close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<Decimal>,

    /// Lowest analyst price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_low_price: Option<Decimal>,

    /// Mean analyst price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_mean_price: Option<Decimal>,

    /// Highest analyst price target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_high_price: Option<Decimal>,

    /// Consensus rating key (e.g., "buy", "hold")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_key: Option<String>,
}

impl QuoteSummary {
    /// Create an empty summary for a symbol
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// P/E ratio, preferring trailing over forward earnings.
    pub fn pe_ratio(&self) -> Option<Decimal> {
        self.trailing_pe.or(self.forward_pe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pe_ratio_prefers_trailing() {
        let mut summary = QuoteSummary::new("AAPL");
        summary.forward_pe = Some(dec!(25.1));
        assert_eq!(summary.pe_ratio(), Some(dec!(25.1)));

        summary.trailing_pe = Some(dec!(28.5));
        assert_eq!(summary.pe_ratio(), Some(dec!(28.5)));
    }
}
