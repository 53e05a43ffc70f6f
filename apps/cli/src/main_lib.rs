use anyhow::{bail, Context};
use portfolio_agent_ai::{AnthropicBackend, ApiCredential, PortfolioAnalyst};
use portfolio_agent_core::utils::time_utils::report_date_today;
use portfolio_agent_core::{build_portfolio_summary, PortfolioConfig, PortfolioSummary};
use portfolio_agent_delivery::format::{format_amount, format_signed_amount, format_signed_pct};
use portfolio_agent_delivery::{ChannelOutcome, Dispatcher, OutcomeStatus, LOCAL_FILE_CHANNEL};
use portfolio_agent_market_data::{SnapshotFetcher, YahooProvider};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::portfolio;

const RULE_WIDTH: usize = 60;

pub fn init_tracing() {
    let log_format =
        std::env::var("PORTFOLIO_AGENT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Checks that must pass before any network call.
pub fn preflight(config: &Config) -> anyhow::Result<(ApiCredential, PortfolioConfig)> {
    let credential = ApiCredential::new(config.anthropic_api_key.clone())
        .context("Set the ANTHROPIC_API_KEY environment variable")?;
    let portfolio = portfolio::portfolio_config().context("Invalid portfolio holdings")?;
    Ok((credential, portfolio))
}

/// One full run: fetch, aggregate, analyze, deliver.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let (credential, portfolio) = preflight(config)?;

    let date = report_date_today();
    println!("═══ Portfolio Agent — {} ═══\n", date);

    println!("Fetching market data...");
    let fetcher = SnapshotFetcher::new(YahooProvider::new()?);
    let summary = build_portfolio_summary(&portfolio, &fetcher, date).await;
    print_positions(&summary);
    print_totals(&summary);

    println!("Requesting analysis from {}...", config.model);
    let analyst = PortfolioAnalyst::new(AnthropicBackend::new(&credential, config.model.as_str())?);
    let report = analyst
        .request_analysis(&summary)
        .await
        .context("Analysis request failed")?;

    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}\n{}\n{}\n", rule, report, rule);

    println!("Delivering report...");
    let dispatcher = Dispatcher::from_config(&config.delivery);
    if dispatcher.is_empty() {
        tracing::warn!("No delivery channels enabled");
    }
    let outcomes = dispatcher.dispatch(&report, &summary).await;
    for outcome in &outcomes {
        print_outcome(outcome);
    }

    if outcomes
        .iter()
        .any(|o| o.channel == LOCAL_FILE_CHANNEL && !o.is_success())
    {
        bail!("Failed to save the report locally");
    }

    println!("\nDone.");
    Ok(())
}

fn print_positions(summary: &PortfolioSummary) {
    for position in &summary.positions {
        let suffix = if position.cash_equivalent { " (cash)" } else { "" };
        println!(
            "  {:<6} ${}{}",
            position.ticker,
            format_amount(position.current_price),
            suffix
        );
    }
    for skipped in &summary.skipped {
        println!("  {:<6} SKIPPED ({})", skipped.ticker, skipped.reason);
    }
}

fn print_totals(summary: &PortfolioSummary) {
    println!();
    println!("  Total value:     ${:>12}", format_amount(summary.total_value));
    println!("  Total cost:      ${:>12}", format_amount(summary.total_cost));
    println!(
        "  Gain/Loss:       ${:>12} ({}%)\n",
        format_signed_amount(summary.total_gain_loss),
        format_signed_pct(summary.total_gain_pct)
    );
}

fn print_outcome(outcome: &ChannelOutcome) {
    match &outcome.status {
        OutcomeStatus::Delivered(location) => println!("  {} → {}", outcome.channel, location),
        OutcomeStatus::Failed(reason) => println!("  {} FAILED: {}", outcome.channel, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        Config::from_lookup(|name| match name {
            "ANTHROPIC_API_KEY" => key.map(str::to_string),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_preflight_rejects_missing_key() {
        let err = preflight(&config_with_key(None)).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_preflight_rejects_blank_key() {
        assert!(preflight(&config_with_key(Some("   "))).is_err());
    }

    #[tokio::test]
    async fn test_run_fails_before_network_without_key() {
        let err = run(&config_with_key(None)).await.unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_preflight_loads_portfolio() {
        let (credential, portfolio) = preflight(&config_with_key(Some("sk-ant-test"))).unwrap();
        assert_eq!(credential.expose(), "sk-ant-test");
        assert_eq!(portfolio.holdings().len(), 8);
    }
}
