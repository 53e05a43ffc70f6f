//! Text formatting shared by the channels.

use chrono::NaiveDate;
use portfolio_agent_core::PortfolioSummary;
use rust_decimal::{Decimal, RoundingStrategy};

/// Title used for the file header, email subject and Notion page.
pub fn report_title(date: NaiveDate) -> String {
    format!("Portfolio Report — {}", date)
}

/// Two-decimal amount with thousands separators, e.g. `12,345.60`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded.abs()))
}

/// Like [`format_amount`] but always signed, e.g. `+1,200.00`.
pub fn format_signed_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "+" };
    format!("{}{}", sign, group_thousands(rounded.abs()))
}

/// Signed two-decimal percentage without grouping, e.g. `+20.00`.
pub fn format_signed_pct(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded < Decimal::ZERO {
        format!("{:.2}", rounded)
    } else {
        format!("+{:.2}", rounded)
    }
}

fn group_thousands(value: Decimal) -> String {
    let text = format!("{:.2}", value);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{}", grouped, frac_part)
}

/// Markdown header prepended to the saved report.
pub fn report_header(summary: &PortfolioSummary) -> String {
    format!(
        "# {}\n**Total Value:** ${}  \n**Total Gain/Loss:** ${} ({}%)\n\n---\n\n",
        report_title(summary.date),
        format_amount(summary.total_value),
        format_signed_amount(summary.total_gain_loss),
        format_signed_pct(summary.total_gain_pct),
    )
}
