use crate::domain::activity::entity::ActivityLogEntry;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Inserts at the head and evicts entries beyond the log capacity.
    async fn append(&self, entry: ActivityLogEntry) -> DomainResult<()>;
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<ActivityLogEntry>>;
}
