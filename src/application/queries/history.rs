// src/application/queries/history.rs
use std::sync::Arc;

use crate::{
    application::{
        authorization::ensure_capability,
        dto::{ActivityEntryDto, AuthenticatedUser, SnapshotDto, SnapshotSummaryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::ActivityLogRepository,
        snapshot::{SnapshotRepository, VersionId},
    },
};

/// Read side of the version history and the activity log.
pub struct HistoryQueryService {
    snapshot_repo: Arc<dyn SnapshotRepository>,
    activity_repo: Arc<dyn ActivityLogRepository>,
}

impl HistoryQueryService {
    pub fn new(
        snapshot_repo: Arc<dyn SnapshotRepository>,
        activity_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            snapshot_repo,
            activity_repo,
        }
    }

    pub async fn list_versions(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<SnapshotSummaryDto>> {
        ensure_capability(actor, "history", "read")?;
        let versions = self.snapshot_repo.list_metadata().await?;
        Ok(versions.into_iter().map(Into::into).collect())
    }

    pub async fn get_version(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
    ) -> ApplicationResult<SnapshotDto> {
        ensure_capability(actor, "history", "read")?;
        // Ids that cannot name a stored version are reported as missing.
        let Ok(version_id) = VersionId::new(id) else {
            return Err(ApplicationError::not_found(format!("version {id} not found")));
        };
        self.snapshot_repo
            .find_by_id(&version_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("version {version_id} not found")))
    }

    pub async fn list_activity(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<ActivityEntryDto>> {
        ensure_capability(actor, "history", "read")?;
        let entries = self.activity_repo.list().await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
