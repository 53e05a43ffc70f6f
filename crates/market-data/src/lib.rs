//! Portfolio Agent Market Data Crate
//!
//! This crate turns a ticker into a [`MarketSnapshot`]: the current price,
//! 52-week range, valuation and analyst fields, and trailing returns that the
//! portfolio aggregator merges into each position.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  SnapshotSource  |  (what the aggregator depends on)
//! +------------------+
//!          |
//!          v
//! +------------------+     +----------------------+
//! | SnapshotFetcher  | --> | PriceFallbackChain   |  (ordered price rules)
//! +------------------+     +----------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Yahoo)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | QuoteSummary +   |
//! | Quote history    |
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketSnapshot`] - Normalized, best-effort market observations for one ticker
//! - [`QuoteSummary`] - Provider quote fields before price resolution
//! - [`Quote`] - A daily historical close
//! - [`PriceSource`] - A named rule in the price fallback chain

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod price;
pub mod provider;

pub use errors::MarketDataError;
pub use fetcher::{trailing_returns, SnapshotFetcher, SnapshotSource, TrailingReturns};
pub use models::{
    rounding, HistoryRange, MarketSnapshot, Quote, QuoteSummary, ReturnWindow,
};
pub use price::{PriceFallbackChain, PriceSource, ResolvedPrice};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
