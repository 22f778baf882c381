use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a text message to a room, returning the platform message id
    async fn send_message(&self, room_id: &str, text: &str) -> Result<String, BotError>;

    /// Post an image by URL to a room
    async fn send_image(&self, room_id: &str, url: &str) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
