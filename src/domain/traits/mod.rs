//! Domain traits - Abstractions for infrastructure implementations

pub mod activities;
pub mod bot;

pub use activities::ActivitySource;
pub use bot::{Bot, BotInfo};
