//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Reply formatting and delivery
//! - Errors: Domain-specific errors
//! - Messaging: Message filtering, parsing, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
