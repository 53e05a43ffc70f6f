use chrono::NaiveDate;
use log::{debug, info, warn};
use portfolio_agent_market_data::{MarketSnapshot, SnapshotSource};
use rust_decimal::Decimal;

use super::summary_model::{PortfolioSummary, Position, SkippedHolding};
use crate::constants::{CASH_EQUIVALENT_NOTE, PERCENT};
use crate::holdings::{Holding, PortfolioConfig};

/// Value every holding and assemble the run's [`PortfolioSummary`].
///
/// Holdings are processed one at a time in registry order. Cash equivalents
/// are valued at cost without a fetch. A holding whose fetch fails, or whose
/// snapshot has no price, is logged and recorded in `skipped`; the run
/// continues and the totals cover only the valued positions.
pub async fn build_portfolio_summary(
    config: &PortfolioConfig,
    source: &dyn SnapshotSource,
    date: NaiveDate,
) -> PortfolioSummary {
    let mut positions = Vec::with_capacity(config.holdings().len());
    let mut skipped = Vec::new();

    for holding in config.holdings() {
        if holding.cash_equivalent {
            debug!("Valuing {} at cost (cash equivalent)", holding.ticker);
            positions.push(cash_position(holding));
            continue;
        }

        match source
            .fetch_snapshot(&holding.ticker, holding.lookup_symbol.as_deref())
            .await
        {
            Ok(snapshot) => match snapshot.price {
                Some(price) => positions.push(priced_position(holding, price, snapshot)),
                None => {
                    warn!("Skipping {}: no price data", holding.ticker);
                    skipped.push(SkippedHolding {
                        ticker: holding.ticker.clone(),
                        reason: "no price data".to_string(),
                    });
                }
            },
            Err(e) => {
                warn!("Skipping {}: market data fetch failed: {}", holding.ticker, e);
                skipped.push(SkippedHolding {
                    ticker: holding.ticker.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let total_value: Decimal = positions.iter().map(|p| p.market_value).sum();
    let total_cost: Decimal = positions.iter().map(|p| p.cost_basis).sum();
    apply_portfolio_weights(&mut positions, total_value);

    let total_gain_loss = total_value - total_cost;
    let total_gain_pct = percent_of(total_gain_loss, total_cost);

    info!(
        "Portfolio summary for {}: {} positions, {} skipped, total value {}",
        date,
        positions.len(),
        skipped.len(),
        total_value.round_dp(2)
    );

    PortfolioSummary {
        date,
        total_value,
        total_cost,
        total_gain_loss,
        total_gain_pct,
        positions,
        recurring_investments: config.recurring().to_vec(),
        skipped,
    }
}

fn cash_position(holding: &Holding) -> Position {
    let value = holding.cost_basis();
    Position {
        ticker: holding.ticker.clone(),
        name: holding.display_name().to_string(),
        shares: holding.shares,
        avg_cost: holding.avg_cost,
        current_price: holding.avg_cost,
        market_value: value,
        cost_basis: value,
        gain_loss: Decimal::ZERO,
        gain_pct: Decimal::ZERO,
        account: holding.account.clone(),
        note: Some(CASH_EQUIVALENT_NOTE.to_string()),
        cash_equivalent: true,
        snapshot: MarketSnapshot::default(),
        weight_pct: Decimal::ZERO,
    }
}

fn priced_position(holding: &Holding, price: Decimal, snapshot: MarketSnapshot) -> Position {
    let market_value = holding.shares * price;
    let cost_basis = holding.cost_basis();
    let gain_loss = market_value - cost_basis;

    Position {
        ticker: holding.ticker.clone(),
        name: holding.display_name().to_string(),
        shares: holding.shares,
        avg_cost: holding.avg_cost,
        current_price: price,
        market_value,
        cost_basis,
        gain_loss,
        gain_pct: percent_of(gain_loss, cost_basis),
        account: holding.account.clone(),
        note: None,
        cash_equivalent: false,
        snapshot,
        weight_pct: Decimal::ZERO,
    }
}

/// part / whole × 100, or zero when `whole` is not positive.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * PERCENT
    } else {
        Decimal::ZERO
    }
}

fn apply_portfolio_weights(positions: &mut [Position], total_value: Decimal) {
    if total_value > Decimal::ZERO {
        for position in positions {
            position.weight_pct = position.market_value / total_value * PERCENT;
        }
    } else {
        debug!("Total portfolio value is zero. Weights set to 0.");
        for position in positions {
            position.weight_pct = Decimal::ZERO;
        }
    }
}
