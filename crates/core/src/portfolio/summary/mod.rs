//! Portfolio aggregation: holdings plus market snapshots become one summary.

mod summary_model;
mod summary_service;


pub use summary_model::{PortfolioSummary, Position, SkippedHolding};
pub use summary_service::build_portfolio_summary;
