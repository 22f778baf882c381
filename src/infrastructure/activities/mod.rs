//! Activities API client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::errors::{BotError, FetchError};
use crate::domain::entities::{ActivityKind, ActivityRecord};
use crate::domain::traits::ActivitySource;
use crate::infrastructure::config::ActivitiesConfig;

/// HTTP client for `<base>/activities/{current|next}?limit=N`
pub struct ActivitiesClient {
    base_url: String,
    client: Client,
}

impl ActivitiesClient {
    pub fn new(config: &ActivitiesConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, kind: ActivityKind) -> String {
        format!("{}/activities/{}", self.base_url, kind.path())
    }
}

#[async_trait]
impl ActivitySource for ActivitiesClient {
    async fn fetch_activities(&self, kind: ActivityKind, limit: u32) -> Result<Vec<ActivityRecord>, FetchError> {
        let response = self.client
            .get(self.url(kind))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let records: Vec<ActivityRecord> = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        tracing::debug!("Activities API returned {} {} records", records.len(), kind);
        Ok(records)
    }
}
