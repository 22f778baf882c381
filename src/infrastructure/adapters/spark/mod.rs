//! Cisco Spark (Webex Teams) adapter

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::entities::Message;
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::{BotConfig, SparkConfig};

/// Webhook notification posted by Spark. Carries ids only, never message text.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub resource: String,
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub id: String,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub person_id: String,
    pub person_email: Option<String>,
}

impl WebhookEvent {
    /// True for "a message was posted" notifications
    pub fn is_message_created(&self) -> bool {
        self.resource == "messages" && self.event == "created"
    }
}

/// Message as returned by `GET /messages/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparkMessage {
    pub id: String,
    pub room_id: String,
    pub person_id: String,
    pub person_email: Option<String>,
    pub text: Option<String>,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SparkMessage> for Message {
    fn from(msg: SparkMessage) -> Self {
        let mut message = Message::new(msg.room_id, msg.person_id, msg.text.unwrap_or_default())
            .with_id(msg.id)
            .with_platform("spark");
        if let Some(email) = msg.person_email {
            message = message.with_sender_email(email);
        }
        if let Some(created) = msg.created {
            message = message.with_timestamp(created);
        }
        message
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageRequest<'a> {
    room_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<&'a str>>,
}

#[derive(Deserialize)]
struct CreatedMessage {
    id: String,
}

/// Spark bot adapter
pub struct SparkAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl SparkAdapter {
    pub fn new(token: impl Into<String>, spark: &SparkConfig, bot: &BotConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(spark.timeout_seconds))
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            token: token.into(),
            api_base: spark.api.trim_end_matches('/').to_string(),
            client,
            info: BotInfo {
                id: bot.id.clone(),
                name: bot.name.clone(),
            },
        })
    }

    /// Get the API URL for a resource path
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn check(response: Response) -> Result<Response, BotError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(BotError::Auth(format!("Spark API error: {} {}", status, body)))
            }
            _ => Err(BotError::Network(format!("Spark API error: {} {}", status, body))),
        }
    }

    /// Fetch the bot's own identity from `GET /people/me`
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Person {
            id: String,
            display_name: Option<String>,
        }

        let response = self.authorized(self.client.get(self.api_url("people/me")))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let person: Person = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: person.id,
            name: person.display_name.unwrap_or_else(|| self.info.name.clone()),
        };

        Ok(())
    }

    /// Resolve a webhook notification into the full message, text included
    pub async fn get_message(&self, message_id: &str) -> Result<Message, BotError> {
        let url = self.api_url(&format!("messages/{}", message_id));
        let response = self.authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let message: SparkMessage = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(message.into())
    }

    async fn create_message(&self, request: &CreateMessageRequest<'_>) -> Result<String, BotError> {
        let response = self.authorized(self.client.post(self.api_url("messages")))
            .json(request)
            .send()
            .await
            .map_err(|e| BotError::Send(e.to_string()))?;

        let created: CreatedMessage = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(created.id)
    }
}

#[async_trait]
impl Bot for SparkAdapter {
    async fn send_message(&self, room_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", room_id, text);

        self.create_message(&CreateMessageRequest {
            room_id,
            text: Some(text),
            files: None,
        })
        .await
    }

    async fn send_image(&self, room_id: &str, url: &str) -> Result<String, BotError> {
        tracing::debug!("Sending image to {}: {}", room_id, url);

        self.create_message(&CreateMessageRequest {
            room_id,
            text: None,
            files: Some(vec![url]),
        })
        .await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
