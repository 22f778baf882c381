//! Message filters - Decide which inbound messages the bot ignores

use std::fmt;
use std::sync::Arc;
use crate::domain::entities::Message;

/// Why a message was dropped without a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Posted by the bot itself
    OwnMessage,
    /// Does not start with the command prefix
    NotACommand,
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discard::OwnMessage => write!(f, "bot is writing"),
            Discard::NotACommand => write!(f, "not a command"),
        }
    }
}

/// A check run on every inbound message before parsing
pub trait MessageFilter: Send + Sync {
    fn check(&self, message: &Message) -> Result<(), Discard>;
}

/// Drops messages the bot posted, so replies never trigger more replies
pub struct OwnMessageFilter {
    bot_id: String,
}

impl OwnMessageFilter {
    pub fn new(bot_id: impl Into<String>) -> Self {
        Self { bot_id: bot_id.into() }
    }
}

impl MessageFilter for OwnMessageFilter {
    fn check(&self, message: &Message) -> Result<(), Discard> {
        if !self.bot_id.is_empty() && message.sender_id == self.bot_id {
            return Err(Discard::OwnMessage);
        }
        Ok(())
    }
}

/// Drops anything that does not start with the command prefix
pub struct CommandPrefixFilter {
    prefix: String,
}

impl CommandPrefixFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl MessageFilter for CommandPrefixFilter {
    fn check(&self, message: &Message) -> Result<(), Discard> {
        if message.text.starts_with(&self.prefix) {
            Ok(())
        } else {
            Err(Discard::NotACommand)
        }
    }
}

/// Ordered filter list; the first rejection wins
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn MessageFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: MessageFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn check(&self, message: &Message) -> Result<(), Discard> {
        self.filters.iter().try_for_each(|f| f.check(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> FilterChain {
        FilterChain::new()
            .add(OwnMessageFilter::new("bot-1"))
            .add(CommandPrefixFilter::new("/"))
    }

    #[test]
    fn test_own_message_is_dropped_first() {
        let message = Message::new("room", "bot-1", "hello");

        assert_eq!(chain().check(&message), Err(Discard::OwnMessage));
    }

    #[test]
    fn test_own_command_is_dropped() {
        let message = Message::new("room", "bot-1", "/next");

        assert_eq!(chain().check(&message), Err(Discard::OwnMessage));
    }

    #[test]
    fn test_plain_text_is_dropped() {
        let message = Message::new("room", "user-1", "what's next?");

        assert_eq!(chain().check(&message), Err(Discard::NotACommand));
    }

    #[test]
    fn test_command_from_user_passes() {
        let message = Message::new("room", "user-1", "/next 2");

        assert_eq!(chain().check(&message), Ok(()));
    }

    #[test]
    fn test_unset_bot_id_matches_nobody() {
        let filter = OwnMessageFilter::new("");
        let message = Message::new("room", "", "/next");

        assert_eq!(filter.check(&message), Ok(()));
    }
}
