use std::sync::Arc;
use crate::domain::traits::Bot;

/// Result of posting a reply. Failures are already logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent(String),
    Failed,
}

/// Sends replies back to rooms. Never retries and never propagates errors.
#[derive(Clone)]
pub struct ReplyService {
    bot: Arc<dyn Bot>,
}

impl ReplyService {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    pub async fn send_text(&self, room_id: &str, text: &str) -> Delivery {
        match self.bot.send_message(room_id, text).await {
            Ok(id) => {
                tracing::info!("sendText command successful (room: {}, message: {})", room_id, id);
                Delivery::Sent(id)
            }
            Err(e) => {
                tracing::error!("Could not send the text back to room {}: {}", room_id, e);
                Delivery::Failed
            }
        }
    }

    pub async fn send_image(&self, room_id: &str, url: &str) -> Delivery {
        match self.bot.send_image(room_id, url).await {
            Ok(id) => {
                tracing::info!("sendImage command successful (room: {}, message: {})", room_id, id);
                Delivery::Sent(id)
            }
            Err(e) => {
                tracing::error!("Could not send the image back to room {}: {}", room_id, e);
                Delivery::Failed
            }
        }
    }
}
