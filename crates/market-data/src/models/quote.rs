use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Trailing window requested from a provider's history endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HistoryRange {
    ThreeMonths,
}

impl HistoryRange {
    /// Range string understood by Yahoo's chart endpoint.
    pub fn as_yahoo_range(&self) -> &'static str {
        match self {
            HistoryRange::ThreeMonths => "3mo",
        }
    }
}

/// Daily closing price
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
}

impl Quote {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self { timestamp, close }
    }
}
