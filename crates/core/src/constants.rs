/// Note attached to cash-equivalent positions in the summary
pub const CASH_EQUIVALENT_NOTE: &str = "Money market fund — cash equivalent";

/// Percent scale factor
pub const PERCENT: rust_decimal::Decimal = rust_decimal_macros::dec!(100);
