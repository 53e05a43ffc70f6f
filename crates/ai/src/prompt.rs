//! Prompt construction for the portfolio analysis.

use portfolio_agent_core::PortfolioSummary;

use crate::error::AiError;

/// Analyst persona and the four report sections the model must produce.
pub const SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

/// Build the user message: the summary as pretty JSON in a fenced block,
/// framed by the run date and the recommendation request.
pub fn build_user_message(summary: &PortfolioSummary) -> Result<String, AiError> {
    let payload = summary.to_pretty_json()?;
    Ok(format!(
        "Here is my portfolio as of {}:\n\n```json\n{}\n```\n\n\
         Analyze each position and give me BUY/SELL/HOLD recommendations.",
        summary.date, payload
    ))
}
