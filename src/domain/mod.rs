//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Message, Command, ActivityRecord)
//! - Traits: Abstractions for infrastructure (Bot, ActivitySource)

pub mod entities;
pub mod traits;
