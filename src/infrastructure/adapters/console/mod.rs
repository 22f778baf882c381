//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::application::messaging::{DispatchOutcome, MessageDispatcher};
use crate::domain::entities::Message;
use crate::domain::traits::{Bot, BotInfo};

/// Room id used for the local session
pub const CONSOLE_ROOM: &str = "console";

/// Sender id of the person typing at the console
pub const CONSOLE_USER: &str = "console-user";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "devzone-bot".to_string(),
            },
            sender: None,
        }
    }

    /// Forward replies to a channel instead of stdout
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }

    async fn emit(&self, line: String) -> Result<String, BotError> {
        match &self.sender {
            Some(sender) => sender
                .send(line)
                .await
                .map_err(|e| BotError::Send(e.to_string()))?,
            None => println!("[BOT] {}", line),
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _room_id: &str, text: &str) -> Result<String, BotError> {
        self.emit(text.to_string()).await
    }

    async fn send_image(&self, _room_id: &str, url: &str) -> Result<String, BotError> {
        self.emit(format!("[Image] {}", url)).await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Turn a typed line into a message. Blank lines yield nothing and only
/// trailing whitespace is trimmed.
fn console_message(line: &str) -> Option<Message> {
    if line.trim().is_empty() {
        return None;
    }
    Some(Message::new(CONSOLE_ROOM, CONSOLE_USER, line.trim_end()).with_platform("console"))
}

/// Read stdin lines as messages from a local user until EOF
pub async fn run_console(dispatcher: &MessageDispatcher) -> Result<(), BotError> {
    tracing::info!("Starting console bot (dev mode), type {}help", dispatcher.parser().prefix());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))?
    {
        let Some(message) = console_message(&line) else {
            continue;
        };
        if let DispatchOutcome::Discarded(reason) = dispatcher.dispatch(message).await {
            println!("[BOT] (ignored: {})", reason);
        }
    }

    tracing::info!("Console closed");
    Ok(())
}
