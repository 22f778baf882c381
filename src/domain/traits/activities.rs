use async_trait::async_trait;
use crate::application::errors::FetchError;
use crate::domain::entities::{ActivityKind, ActivityRecord};

/// Source of schedule entries, usually the remote activities API
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_activities(&self, kind: ActivityKind, limit: u32) -> Result<Vec<ActivityRecord>, FetchError>;
}
