//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub commands: CommandsConfig,
    pub activities: ActivitiesConfig,
    pub spark: SparkConfig,
    pub server: ServerConfig,
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Sender id the bot posts as; messages from it are never answered
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CommandsConfig {
    pub prefix: String,
    pub current: String,
    pub next: String,
    pub help: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ActivitiesConfig {
    pub api: String,
    pub default_limit: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SparkConfig {
    pub api: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub port: u16,
    pub webhook_path: String,
}

/// Canned replies. `{next}` is replaced with the full next command, e.g. `/next`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MessagesConfig {
    pub welcome: String,
    pub no_current: String,
    pub no_next: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "devzone-bot".to_string(),
            id: String::new(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            current: "current".to_string(),
            next: "next".to_string(),
            help: "help".to_string(),
        }
    }
}

impl Default for ActivitiesConfig {
    fn default() -> Self {
        Self {
            api: "https://devnetzone.cleverapps.io/api/v1".to_string(),
            default_limit: 5,
            timeout_seconds: 10,
        }
    }
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            api: "https://api.ciscospark.com/v1".to_string(),
            token: None,
            timeout_seconds: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            webhook_path: "/webhook".to_string(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            welcome: "Welcome to the @CiscoDevNet Zone at #CLUS".to_string(),
            no_current: "No activity in the DevNet Zone currently. Type {next} to check upcoming activities."
                .to_string(),
            no_next: "No upcoming activity, event may be over ?! Hope you had a great Cisco Live at the DevNet Zone and see you next year !"
                .to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Override fields from process environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from any variable lookup; unset or empty values are skipped
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("SPARK_TOKEN") {
            self.spark.token = Some(token);
        }
        if let Some(api) = var("SPARK_API") {
            self.spark.api = api;
        }
        if let Some(id) = var("BOT_PERSONID") {
            self.bot.id = id;
        }
        if let Some(api) = var("ACTIVITIES_API") {
            self.activities.api = api;
        }
        if let Some(max) = var("ACTIVITIES_MAX") {
            self.activities.default_limit = max
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("ACTIVITIES_MAX={}", max)))?;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT={}", port)))?;
        }
        if let Some(path) = var("WEBHOOK_URI") {
            self.server.webhook_path = path;
        }
        if let Some(prefix) = var("COMMAND_PREFIX") {
            self.commands.prefix = prefix;
        }
        if let Some(keyword) = var("COMMAND_CURRENT") {
            self.commands.current = keyword;
        }
        if let Some(keyword) = var("COMMAND_NEXT") {
            self.commands.next = keyword;
        }
        if let Some(keyword) = var("COMMAND_HELP") {
            self.commands.help = keyword;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activities.default_limit < 1 {
            return Err(ConfigError::InvalidValue(
                "activities.default-limit must be at least 1".to_string(),
            ));
        }
        if self.activities.api.trim().is_empty() {
            return Err(ConfigError::MissingField("activities.api".to_string()));
        }
        if self.commands.prefix.is_empty() {
            return Err(ConfigError::MissingField("commands.prefix".to_string()));
        }

        let keywords = [
            ("commands.current", &self.commands.current),
            ("commands.next", &self.commands.next),
            ("commands.help", &self.commands.help),
        ];
        for (field, keyword) in &keywords {
            if keyword.trim().is_empty() || keyword.split_whitespace().count() != 1 {
                return Err(ConfigError::InvalidValue(format!("{} must be a single word", field)));
            }
        }
        for (i, (field, keyword)) in keywords.iter().enumerate() {
            if keywords[i + 1..].iter().any(|(_, other)| other.eq_ignore_ascii_case(keyword)) {
                return Err(ConfigError::InvalidValue(format!("{} duplicates another command", field)));
            }
        }

        if !self.server.webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidValue(
                "server.webhook-path must start with '/'".to_string(),
            ));
        }

        Ok(())
    }

    /// Token from config, if any
    pub fn token(&self) -> Option<&str> {
        self.spark.token.as_deref().filter(|t| !t.is_empty())
    }
}
