//! Yahoo Finance API response models.
//!
//! These models parse the quoteSummary API, which carries the valuation and
//! analyst fields that the chart endpoint does not.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    /// `null` when the symbol is unknown
    #[serde(default)]
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

/// Error object returned alongside an empty result
#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
    pub financial_data: Option<YahooFinancialData>,
    pub default_key_statistics: Option<YahooKeyStatistics>,
}

/// Price data from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub regular_market_price: Option<YahooPriceDetail>,
    pub regular_market_previous_close: Option<YahooPriceDetail>,
}

/// Price detail with raw and formatted values
#[derive(Debug, Deserialize, Clone)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
    // Note: fmt field exists but we only use raw values
}

/// Summary detail data (valuation and range)
/// Yahoo returns these as nested objects like {"raw": 123.45, "fmt": "123.45"}
/// or empty objects {} when no data is available.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub previous_close: Option<YahooPriceDetail>,
    pub nav_price: Option<YahooPriceDetail>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<YahooPriceDetail>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<YahooPriceDetail>,
    pub fifty_two_week_high: Option<YahooPriceDetail>,
    pub fifty_two_week_low: Option<YahooPriceDetail>,
}

/// Financial data (live price and analyst consensus)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooFinancialData {
    pub current_price: Option<YahooPriceDetail>,
    pub target_high_price: Option<YahooPriceDetail>,
    pub target_low_price: Option<YahooPriceDetail>,
    pub target_mean_price: Option<YahooPriceDetail>,
    pub recommendation_key: Option<String>,
}

/// Key statistics (forward P/E is sometimes only reported here)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooKeyStatistics {
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<YahooPriceDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_price_detail() {
        let json = r#"{"raw": 150.25, "fmt": "150.25"}"#;
        let detail: YahooPriceDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, Some(150.25));
    }

    #[test]
    fn test_deserialize_price_detail_empty_object() {
        let detail: YahooPriceDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.raw, None);
    }

    #[test]
    fn test_deserialize_summary_detail() {
        let json = r#"{
            "previousClose": {"raw": 187.5, "fmt": "187.50"},
            "trailingPE": {"raw": 28.5, "fmt": "28.50"},
            "forwardPE": {"raw": 25.0, "fmt": "25.00"},
            "fiftyTwoWeekHigh": {"raw": 199.62, "fmt": "199.62"},
            "fiftyTwoWeekLow": {"raw": 124.17, "fmt": "124.17"},
            "navPrice": {}
        }"#;
        let detail: YahooSummaryDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.previous_close.and_then(|d| d.raw), Some(187.5));
        assert_eq!(detail.trailing_pe.and_then(|d| d.raw), Some(28.5));
        assert_eq!(detail.forward_pe.and_then(|d| d.raw), Some(25.0));
        assert_eq!(detail.fifty_two_week_high.and_then(|d| d.raw), Some(199.62));
        assert_eq!(detail.fifty_two_week_low.and_then(|d| d.raw), Some(124.17));
        assert_eq!(detail.nav_price.and_then(|d| d.raw), None);
    }

    #[test]
    fn test_deserialize_financial_data() {
        let json = r#"{
            "currentPrice": {"raw": 190.1, "fmt": "190.10"},
            "targetHighPrice": {"raw": 250.0, "fmt": "250.00"},
            "targetLowPrice": {"raw": 160.0, "fmt": "160.00"},
            "targetMeanPrice": {"raw": 210.3, "fmt": "210.30"},
            "recommendationKey": "buy"
        }"#;
        let data: YahooFinancialData = serde_json::from_str(json).unwrap();
        assert_eq!(data.current_price.and_then(|d| d.raw), Some(190.1));
        assert_eq!(data.target_mean_price.and_then(|d| d.raw), Some(210.3));
        assert_eq!(data.recommendation_key.as_deref(), Some("buy"));
    }

    #[test]
    fn test_deserialize_unknown_symbol_response() {
        let json = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_none());
        assert_eq!(
            response.quote_summary.error.and_then(|e| e.code).as_deref(),
            Some("Not Found")
        );
    }
}
