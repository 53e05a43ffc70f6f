//! The analyzed portfolio. Edit these to match your accounts.
//!
//! Shares are combined across accounts for the same ticker. Add a lookup
//! symbol when the market-data provider lists the instrument under a
//! different symbol.

use portfolio_agent_core::{Holding, PortfolioConfig, RecurringInvestment};
use rust_decimal_macros::dec;

pub fn holdings() -> portfolio_agent_core::Result<Vec<Holding>> {
    Ok(vec![
        Holding::new("FXAIX", dec!(16.915), dec!(233.23), "Roth IRA + 401k")?,
        Holding::new("QQQM", dec!(9.144), dec!(243.64), "Roth IRA + Taxable")?,
        Holding::new("SPY", dec!(17.442), dec!(670.00), "Roth IRA + Taxable")?,
        Holding::new("FSMDX", dec!(38.002), dec!(37.47), "401k")?,
        Holding::new("FSPGX", dec!(54.259), dec!(45.79), "401k")?,
        Holding::new("BTC", dec!(125.652), dec!(33.26), "Taxable")?
            .with_name("Grayscale Bitcoin Mini Trust ETF"),
        Holding::new("FCNTX", dec!(16.227), dec!(24.65), "Taxable")?,
        // money market, always ~$1
        Holding::new("SPAXX", dec!(592.61), dec!(1.00), "Roth IRA + Taxable")?
            .as_cash_equivalent(),
    ])
}

/// Dollar-cost-averaging schedule, passed to the analysis as context.
pub fn recurring() -> Vec<RecurringInvestment> {
    vec![
        RecurringInvestment::new("BTC", dec!(300), "biweekly", "Taxable brokerage"),
        RecurringInvestment::new("SPY", dec!(400), "biweekly", "Taxable brokerage"),
        RecurringInvestment::new("FCNTX", dec!(400), "biweekly", "Taxable brokerage"),
        RecurringInvestment::new(
            "FXAIX",
            dec!(432.34),
            "biweekly + monthly",
            "401k (base $104.74 biweekly + commission $327.60 monthly)",
        ),
        RecurringInvestment::new(
            "FSPGX",
            dec!(319.26),
            "biweekly + monthly",
            "401k (base $77.34 biweekly + commission $241.92 monthly)",
        ),
        RecurringInvestment::new(
            "FSMDX",
            dec!(198.59),
            "biweekly + monthly",
            "401k (base $48.11 biweekly + commission $150.48 monthly)",
        ),
    ]
}

pub fn portfolio_config() -> portfolio_agent_core::Result<PortfolioConfig> {
    PortfolioConfig::new(holdings()?, recurring())
}
