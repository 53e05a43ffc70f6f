use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::serialize_rounded_opt;
use crate::price::PriceSource;

/// Return over a trailing window shorter than three months.
///
/// Emitted instead of a 3-month return when the provider has too little
/// history, so the payload says which window the figure covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnWindow {
    /// Trading days between the first and last sample
    pub days: usize,
    /// Percentage return over those days
    pub pct: Decimal,
}

/// Point-in-time market observations for one ticker.
///
/// Every field is optional: the fetcher fills in what the provider returned
/// and leaves the rest absent. Absent fields are omitted when serialized.
/// `price` is not serialized; positions carry it as `current_price`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(skip)]
    pub price: Option<Decimal>,

    /// Rule in the fallback chain that produced `price`
    #[serde(skip)]
    pub price_source: Option<PriceSource>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub high_52w: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub low_52w: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub pe_ratio: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub target_mean: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub target_low: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub target_high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyst_recommendation: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub perf_1mo_pct: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub perf_3mo_pct: Option<Decimal>,

    /// Trading days covered by `perf_window_pct`; set only when
    /// `perf_3mo_pct` is not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perf_window_days: Option<usize>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_opt"
    )]
    pub perf_window_pct: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_fields_are_omitted() {
        let snapshot = MarketSnapshot {
            price: Some(dec!(120)),
            high_52w: Some(dec!(130.456)),
            ..Default::default()
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(json["high_52w"].as_f64(), Some(130.46));
        assert!(object.get("price").is_none());
    }

    #[test]
    fn test_perf_window_serializes_labelled() {
        let snapshot = MarketSnapshot {
            perf_window_days: Some(40),
            perf_window_pct: Some(dec!(3.14159)),
            ..Default::default()
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["perf_window_days"].as_u64(), Some(40));
        assert_eq!(json["perf_window_pct"].as_f64(), Some(3.14));
        assert!(json.get("perf_3mo_pct").is_none());
    }
}
