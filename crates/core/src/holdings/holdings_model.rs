//! Holdings registry models.

use std::collections::HashSet;

use portfolio_agent_market_data::rounding::serialize_rounded;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A configured position in one ticker.
///
/// Holdings are immutable for a run. Use [`Holding::new`] so the share count
/// and average cost are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub shares: Decimal,
    pub avg_cost: Decimal,
    /// Account or accounts the shares are held in, free text
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Symbol the market-data provider knows this instrument under, when it
    /// differs from `ticker`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_symbol: Option<String>,
    /// Money-market style holding valued at cost and never fetched
    #[serde(default)]
    pub cash_equivalent: bool,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        shares: Decimal,
        avg_cost: Decimal,
        account: impl Into<String>,
    ) -> Result<Self> {
        let holding = Self {
            ticker: ticker.into().trim().to_string(),
            shares,
            avg_cost,
            account: account.into(),
            name: None,
            lookup_symbol: None,
            cash_equivalent: false,
        };
        holding.validate()?;
        Ok(holding)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_lookup_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.lookup_symbol = Some(symbol.into());
        self
    }

    /// Mark the holding as a cash equivalent.
    pub fn as_cash_equivalent(mut self) -> Self {
        self.cash_equivalent = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }
        if self.shares < Decimal::ZERO {
            return Err(self.negative("shares", self.shares));
        }
        if self.avg_cost < Decimal::ZERO {
            return Err(self.negative("avg_cost", self.avg_cost));
        }
        Ok(())
    }

    fn negative(&self, field: &'static str, value: Decimal) -> crate::errors::Error {
        ValidationError::NegativeValue {
            ticker: self.ticker.clone(),
            field,
            value,
        }
        .into()
    }

    /// Display name, falling back to the ticker.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.ticker)
    }

    /// shares × avg_cost
    pub fn cost_basis(&self) -> Decimal {
        self.shares * self.avg_cost
    }
}

/// A scheduled contribution into a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringInvestment {
    pub ticker: String,
    #[serde(serialize_with = "serialize_rounded")]
    pub amount: Decimal,
    /// Free-text schedule, e.g. "biweekly"
    pub frequency: String,
    pub note: String,
}

impl RecurringInvestment {
    pub fn new(
        ticker: impl Into<String>,
        amount: Decimal,
        frequency: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            amount,
            frequency: frequency.into(),
            note: note.into(),
        }
    }
}

/// The full registry handed to the aggregator: holdings in processing order
/// plus the recurring contributions passed through to the summary.
#[derive(Debug, Clone, Default)]
pub struct PortfolioConfig {
    holdings: Vec<Holding>,
    recurring: Vec<RecurringInvestment>,
}

impl PortfolioConfig {
    /// Build a registry, rejecting invalid holdings and duplicate tickers.
    pub fn new(holdings: Vec<Holding>, recurring: Vec<RecurringInvestment>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(holdings.len());
        for holding in &holdings {
            holding.validate()?;
            if !seen.insert(holding.ticker.as_str()) {
                return Err(ValidationError::DuplicateTicker(holding.ticker.clone()).into());
            }
        }
        Ok(Self {
            holdings,
            recurring,
        })
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn recurring(&self) -> &[RecurringInvestment] {
        &self.recurring
    }

    pub fn get(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.ticker == ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_trims_ticker_and_defaults() {
        let holding = Holding::new(" SPY ", dec!(17.442), dec!(670), "Roth IRA").unwrap();
        assert_eq!(holding.ticker, "SPY");
        assert_eq!(holding.display_name(), "SPY");
        assert!(!holding.cash_equivalent);
        assert_eq!(holding.cost_basis(), dec!(11686.14));
    }

    #[test]
    fn test_rejects_blank_ticker() {
        let err = Holding::new("  ", dec!(1), dec!(1), "Taxable").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref f)) if f == "ticker"
        ));
    }

    #[test]
    fn test_rejects_negative_shares_and_cost() {
        let err = Holding::new("QQQM", dec!(-1), dec!(10), "Taxable").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NegativeValue { field: "shares", .. })
        ));

        let err = Holding::new("QQQM", dec!(1), dec!(-0.01), "Taxable").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NegativeValue { field: "avg_cost", .. })
        ));
    }

    #[test]
    fn test_zero_values_are_allowed() {
        assert!(Holding::new("FREE", dec!(0), dec!(0), "Gift").is_ok());
    }

    #[test]
    fn test_builder_options() {
        let holding = Holding::new("BTC", dec!(125.652), dec!(33.26), "Taxable")
            .unwrap()
            .with_name("Grayscale Bitcoin Mini Trust ETF")
            .with_lookup_symbol("BTC");
        assert_eq!(holding.display_name(), "Grayscale Bitcoin Mini Trust ETF");
        assert_eq!(holding.lookup_symbol.as_deref(), Some("BTC"));

        let cash = Holding::new("SPAXX", dec!(592.61), dec!(1), "Roth IRA")
            .unwrap()
            .as_cash_equivalent();
        assert!(cash.cash_equivalent);
    }

    #[test]
    fn test_config_rejects_duplicate_tickers() {
        let holdings = vec![
            Holding::new("SPY", dec!(1), dec!(1), "A").unwrap(),
            Holding::new("FXAIX", dec!(1), dec!(1), "A").unwrap(),
            Holding::new("SPY", dec!(2), dec!(1), "B").unwrap(),
        ];
        let err = PortfolioConfig::new(holdings, vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateTicker(ref t)) if t == "SPY"
        ));
    }

    #[test]
    fn test_config_preserves_order() {
        let holdings = vec![
            Holding::new("FXAIX", dec!(1), dec!(1), "A").unwrap(),
            Holding::new("QQQM", dec!(1), dec!(1), "A").unwrap(),
            Holding::new("SPY", dec!(1), dec!(1), "A").unwrap(),
        ];
        let recurring = vec![RecurringInvestment::new(
            "SPY",
            dec!(400),
            "biweekly",
            "Taxable brokerage",
        )];
        let config = PortfolioConfig::new(holdings, recurring).unwrap();

        let tickers: Vec<_> = config.holdings().iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["FXAIX", "QQQM", "SPY"]);
        assert_eq!(config.recurring().len(), 1);
        assert!(config.get("QQQM").is_some());
        assert!(config.get("VTI").is_none());
    }

    #[test]
    fn test_recurring_serializes_rounded_amount() {
        let recurring = RecurringInvestment::new(
            "FXAIX",
            dec!(432.344),
            "biweekly + monthly",
            "401k",
        );
        let json = serde_json::to_value(&recurring).unwrap();
        assert_eq!(json["ticker"], "FXAIX");
        assert_eq!(json["amount"].as_f64(), Some(432.34));
        assert_eq!(json["frequency"], "biweekly + monthly");
    }
}
