use crate::domain::errors::DomainResult;
use crate::domain::snapshot::entity::{Snapshot, SnapshotMetadata, VersionId};
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Durably stores a new snapshot. Fails with `Conflict` if the id exists.
    async fn insert(&self, snapshot: Snapshot) -> DomainResult<()>;
    async fn find_by_id(&self, id: &VersionId) -> DomainResult<Option<Snapshot>>;
    /// Newest first: by timestamp, then by creation order.
    async fn list_metadata(&self) -> DomainResult<Vec<SnapshotMetadata>>;
}
