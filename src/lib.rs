//! devzone-bot - relays chat slash commands to an activities API

pub mod domain;
pub mod application;
pub mod infrastructure;
