//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Yahoo Finance implementation
//!
//! Providers only report raw fields. Choosing a price and computing
//! trailing returns happens in [`crate::fetcher`], so the same policy applies
//! whichever provider is plugged in.

mod traits;

pub mod yahoo;

pub use traits::MarketDataProvider;
