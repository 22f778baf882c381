//! Message handling - Event-driven message processing

pub mod dispatcher;
pub mod filter;
pub mod parser;

pub use dispatcher::{DispatchOutcome, MessageDispatcher};
pub use filter::{Discard, FilterChain, MessageFilter};
pub use parser::CommandParser;
