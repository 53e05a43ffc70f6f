//! Portfolio Agent Core - holdings registry and portfolio aggregation.
//!
//! This crate owns the domain model: the configured holdings, the derived
//! positions and the [`PortfolioSummary`] handed to the analysis step. It
//! depends on market data only through the
//! [`SnapshotSource`](portfolio_agent_market_data::SnapshotSource) trait.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod portfolio;
pub mod utils;

pub use holdings::{Holding, PortfolioConfig, RecurringInvestment};
pub use portfolio::summary::{
    build_portfolio_summary, PortfolioSummary, Position, SkippedHolding,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
