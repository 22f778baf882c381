//! Command parser - Turns raw message text into a validated Command

use crate::domain::entities::{ActivityKind, Command, CommandKind, CommandRegistry, CommandSpec};
use crate::infrastructure::config::CommandsConfig;

/// Parses slash commands against the configured keyword table
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
    registry: CommandRegistry,
    default_limit: u32,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>, registry: CommandRegistry, default_limit: u32) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
            default_limit: default_limit.max(1),
        }
    }

    /// Build the standard next/current/help table from config
    pub fn from_config(commands: &CommandsConfig, default_limit: u32) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::new(CommandKind::Activities(ActivityKind::Next), &commands.next)
                .with_description("to check upcoming activities"),
        );
        registry.register(
            CommandSpec::new(CommandKind::Activities(ActivityKind::Current), &commands.current)
                .with_description("for current activities"),
        );
        registry.register(CommandSpec::new(CommandKind::Help, &commands.help));

        Self::new(&commands.prefix, registry, default_limit)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Parse a message text. Returns None when the text is not a command.
    pub fn parse(&self, text: &str) -> Option<Command> {
        let body = text.strip_prefix(&self.prefix)?.to_lowercase();
        let mut tokens = body.split_whitespace();

        let keyword = tokens.next().unwrap_or("");
        let limit = self.resolve_limit(tokens.next());

        let command = match self.registry.find(keyword).map(|c| c.kind) {
            Some(CommandKind::Activities(kind)) => Command::activities(kind, limit),
            Some(CommandKind::Help) => Command::Help,
            None => Command::Unrecognized(keyword.to_string()),
        };

        Some(command)
    }

    /// Missing or non-numeric overrides use the default; anything below 1 becomes 1
    /// and anything past `u32::MAX` saturates, whatever its magnitude.
    fn resolve_limit(&self, token: Option<&str>) -> u32 {
        let Some(token) = token else {
            return self.default_limit;
        };
        let (negative, digits) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token.strip_prefix('+').unwrap_or(token)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return self.default_limit;
        }
        if negative {
            return 1;
        }

        digits.parse::<u32>().unwrap_or(u32::MAX).max(1)
    }
}
