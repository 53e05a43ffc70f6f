//! Holdings registry: the fixed positions and recurring contributions a run
//! analyzes.

mod holdings_model;

pub use holdings_model::{Holding, PortfolioConfig, RecurringInvestment};
