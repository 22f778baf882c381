//! Domain entities - Core business objects with no external dependencies

pub mod activity;
pub mod command;
pub mod message;

pub use activity::{ActivityKind, ActivityRecord};
pub use command::{Command, CommandKind, CommandRegistry, CommandSpec};
pub use message::Message;
