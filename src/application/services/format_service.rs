//! Reply text rendering. Pure functions of config and input, no I/O.

use crate::domain::entities::{ActivityKind, ActivityRecord, CommandKind, CommandRegistry};
use crate::infrastructure::config::MessagesConfig;

/// Renders activity listings, help and error replies
#[derive(Debug, Clone)]
pub struct ActivityFormatter {
    prefix: String,
    command_list: String,
    welcome: String,
    no_current: String,
    no_next: String,
}

impl ActivityFormatter {
    pub fn new(prefix: impl Into<String>, registry: &CommandRegistry, messages: &MessagesConfig) -> Self {
        let prefix = prefix.into();

        let command_list = registry
            .listed()
            .map(|c| {
                format!(
                    "   {}{} {}\n",
                    prefix,
                    c.keyword,
                    c.description.as_deref().unwrap_or_default()
                )
            })
            .collect::<String>();

        let next_command = registry
            .keyword(CommandKind::Activities(ActivityKind::Next))
            .map(|k| format!("{}{}", prefix, k))
            .unwrap_or_default();

        Self {
            command_list,
            welcome: messages.welcome.clone(),
            no_current: messages.no_current.replace("{next}", &next_command),
            no_next: messages.no_next.replace("{next}", &next_command),
            prefix,
        }
    }

    /// Listing for `records`, in the order given
    pub fn format(&self, kind: ActivityKind, records: &[ActivityRecord]) -> String {
        if records.is_empty() {
            return self.empty(kind).to_string();
        }

        let mut msg = format!("Here are the {} {} activities", records.len(), kind.label());
        for record in records {
            msg.push_str(&format!(
                "\n- {} {}: {}\n   at {} by {}",
                record.day, record.begin_time, record.title, record.location, record.speaker
            ));
        }
        msg
    }

    pub fn empty(&self, kind: ActivityKind) -> &str {
        match kind {
            ActivityKind::Current => &self.no_current,
            ActivityKind::Next => &self.no_next,
        }
    }

    /// Shown when the activities API cannot be reached or answers badly
    pub fn failure(&self, kind: ActivityKind) -> String {
        format!(
            "Could not retrieve {} activities, sorry [Activities API not responding]",
            kind.label()
        )
    }

    pub fn help(&self) -> String {
        format!("{}\n{}", self.welcome, self.command_list)
    }

    pub fn unrecognized(&self, keyword: &str) -> String {
        format!(
            "Sorry, command {}{} is not supported\n{}",
            self.prefix, keyword, self.command_list
        )
    }
}
