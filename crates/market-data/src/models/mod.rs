//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `quote` - Historical daily quotes and the history window (Quote, HistoryRange)
//! - `summary` - Provider quote fields prior to normalization (QuoteSummary)
//! - `snapshot` - The normalized per-ticker observation set (MarketSnapshot)
//! - `rounding` - Presentation-time rounding for serialized figures

mod quote;
pub mod rounding;
mod snapshot;
mod summary;

pub use quote::{HistoryRange, Quote};
pub use snapshot::{MarketSnapshot, ReturnWindow};
pub use summary::QuoteSummary;
