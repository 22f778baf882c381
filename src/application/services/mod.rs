//! Application services - Business logic orchestration

pub mod format_service;
pub mod reply_service;

pub use format_service::ActivityFormatter;
pub use reply_service::{Delivery, ReplyService};
