//! Notion channel: one database page per report.
//!
//! Notion limits a rich-text element to 2,000 characters, so the report is
//! split into fixed-size chunks, one paragraph block each.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use portfolio_agent_core::PortfolioSummary;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::channel::DeliveryChannel;
use crate::config::{required, NotionConfig};
use crate::error::{DeliveryError, DeliveryResult};
use crate::format::report_title;

pub const NOTION_CHANNEL: &str = "notion";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Characters per paragraph block.
pub const NOTION_CHUNK_CHARS: usize = 1_900;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

/// Split `report` into consecutive chunks of at most `size` characters.
pub fn chunk_report(report: &str, size: usize) -> Vec<&str> {
    if size == 0 {
        return vec![report];
    }
    let mut chunks = Vec::with_capacity(report.len() / size + 1);
    let mut rest = report;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(size)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Request body for creating the report page.
pub fn page_body(database_id: &str, date: NaiveDate, report: &str) -> Value {
    let children: Vec<Value> = chunk_report(report, NOTION_CHUNK_CHARS)
        .into_iter()
        .map(|chunk| {
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{"type": "text", "text": {"content": chunk}}],
                },
            })
        })
        .collect();

    json!({
        "parent": {"database_id": database_id},
        "properties": {
            "Name": {"title": [{"text": {"content": report_title(date)}}]},
            "Date": {"date": {"start": date.to_string()}},
        },
        "children": children,
    })
}

pub struct NotionChannel {
    client: reqwest::Client,
    base_url: String,
    database_id: String,
    auth_header: HeaderValue,
}

impl NotionChannel {
    pub fn from_config(config: &NotionConfig) -> DeliveryResult<Self> {
        let api_key = required(&config.api_key)
            .ok_or_else(|| DeliveryError::config(NOTION_CHANNEL, "API key is not set"))?;
        let database_id = required(&config.database_id)
            .ok_or_else(|| DeliveryError::config(NOTION_CHANNEL, "database id is not set"))?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| DeliveryError::config(NOTION_CHANNEL, format!("Invalid API key format: {}", e)))?;
        auth_header.set_sensitive(true);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeliveryError::Internal(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database_id: database_id.to_string(),
            auth_header,
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
        headers
    }
}

#[async_trait]
impl DeliveryChannel for NotionChannel {
    fn name(&self) -> &'static str {
        NOTION_CHANNEL
    }

    async fn deliver(&self, report: &str, summary: &PortfolioSummary) -> DeliveryResult<String> {
        let url = format!("{}/v1/pages", self.base_url);
        let body = page_body(&self.database_id, summary.date, report);
        debug!("[Notion] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(DeliveryError::Status {
                channel: NOTION_CHANNEL,
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        let location = match serde_json::from_str::<CreatedPage>(&text) {
            Ok(page) => page.url.unwrap_or(page.id),
            Err(_) => "page created".to_string(),
        };
        info!("Notion page created: {}", location);
        Ok(location)
    }
}
