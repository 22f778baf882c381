use super::ActivityKind;

/// A parsed, validated bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Current { limit: u32 },
    Next { limit: u32 },
    Help,
    Unrecognized(String),
}

impl Command {
    pub fn activities(kind: ActivityKind, limit: u32) -> Self {
        match kind {
            ActivityKind::Current => Command::Current { limit },
            ActivityKind::Next => Command::Next { limit },
        }
    }

    /// Kind and limit for commands that hit the activities API
    pub fn activity_request(&self) -> Option<(ActivityKind, u32)> {
        match self {
            Command::Current { limit } => Some((ActivityKind::Current, *limit)),
            Command::Next { limit } => Some((ActivityKind::Next, *limit)),
            _ => None,
        }
    }
}

/// Handler a keyword routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Activities(ActivityKind),
    Help,
}

/// Keyword entry in the command table
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub kind: CommandKind,
    pub keyword: String,
    pub description: Option<String>,
}

impl CommandSpec {
    pub fn new(kind: CommandKind, keyword: impl Into<String>) -> Self {
        Self {
            kind,
            keyword: keyword.into().to_lowercase(),
            description: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Case-insensitive exact token match
    pub fn matches(&self, input: &str) -> bool {
        self.keyword == input.to_lowercase()
    }
}

/// Fixed table of keywords the bot answers to, in listing order
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: CommandSpec) {
        self.commands.retain(|c| c.keyword != command.keyword);
        self.commands.push(command);
    }

    pub fn find(&self, input: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn keyword(&self, kind: CommandKind) -> Option<&str> {
        self.commands
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.keyword.as_str())
    }

    /// Commands that show up in help listings
    pub fn listed(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().filter(|c| c.description.is_some())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
