//! Local markdown file channel.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use portfolio_agent_core::PortfolioSummary;

use crate::channel::DeliveryChannel;
use crate::config::LocalFileConfig;
use crate::error::DeliveryResult;
use crate::format::report_header;

pub const LOCAL_FILE_CHANNEL: &str = "local_file";

/// Writes `{output_dir}/portfolio_report_{date}.md`, overwriting any report
/// from the same date.
pub struct LocalFileChannel {
    output_dir: PathBuf,
}

impl LocalFileChannel {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &LocalFileConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        report_path(&self.output_dir, date)
    }
}

pub fn report_path(output_dir: &Path, date: NaiveDate) -> PathBuf {
    output_dir.join(format!("portfolio_report_{}.md", date))
}

#[async_trait]
impl DeliveryChannel for LocalFileChannel {
    fn name(&self) -> &'static str {
        LOCAL_FILE_CHANNEL
    }

    async fn deliver(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<String> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.report_path(summary.date);
        let content = format!("{}{}", report_header(summary), report);
        tokio::fs::write(&path, content).await?;

        info!("Saved report to {}", path.display());
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn summary(day: u32) -> PortfolioSummary {
        PortfolioSummary {
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            total_value: dec!(1200),
            total_cost: dec!(1000),
            total_gain_loss: dec!(200),
            total_gain_pct: dec!(20),
            positions: vec![],
            recurring_investments: vec![],
            skipped: vec![],
        }
    }

    #[tokio::test]
    async fn test_creates_directory_and_writes_header() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("reports");
        let channel = LocalFileChannel::new(&output_dir);

        let location = channel.deliver("## Overview\nHOLD everything", &summary(20)).await.unwrap();

        let path = output_dir.join("portfolio_report_2026-02-20.md");
        assert_eq!(location, path.display().to_string());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Portfolio Report — 2026-02-20\n**Total Value:** $1,200.00  \n"));
        assert!(content.contains("**Total Gain/Loss:** $+200.00 (+20.00%)\n\n---\n\n"));
        assert!(content.ends_with("## Overview\nHOLD everything"));
    }

    #[tokio::test]
    async fn test_same_date_overwrites() {
        let dir = tempdir().unwrap();
        let channel = LocalFileChannel::new(dir.path());

        channel.deliver("first", &summary(20)).await.unwrap();
        channel.deliver("second", &summary(20)).await.unwrap();
        channel.deliver("other day", &summary(21)).await.unwrap();

        let content = std::fs::read_to_string(channel.report_path(summary(20).date)).unwrap();
        assert!(content.ends_with("second"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_unwritable_directory_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let channel = LocalFileChannel::new(&blocker);

        let result = channel.deliver("report", &summary(20)).await;
        assert!(matches!(result, Err(crate::error::DeliveryError::Io(_))));
    }
}
