//! Presentation-time rounding.
//!
//! Currency amounts and percentages are carried at full precision through
//! every calculation and only rounded when serialized. Use these with
//! `#[serde(serialize_with = "...")]`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Decimal places used for every displayed currency or percentage figure.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Round a value to display precision (half away from zero).
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Serialize a decimal rounded to display precision.
pub fn serialize_rounded<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Serialize::serialize(&round_display(*value), serializer)
}

/// Serialize an optional decimal rounded to display precision.
///
/// Pair with `skip_serializing_if = "Option::is_none"` so absent values are
/// omitted rather than written as `null`.
pub fn serialize_rounded_opt<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.map(round_display).serialize(serializer)
}
