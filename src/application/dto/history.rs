use crate::domain::activity::ActivityLogEntry;
use crate::domain::snapshot::{Snapshot, SnapshotMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmployeeDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummaryDto {
    pub id: String,
    #[serde(with = "serde_time")]
    pub timestamp: DateTime<Utc>,
    pub author: String,
    /// `publish`, `rollback-backup` or `import`.
    pub kind: String,
    pub change_count: usize,
    pub employee_count: usize,
    pub changes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub checksum: String,
}

impl From<SnapshotMetadata> for SnapshotSummaryDto {
    fn from(meta: SnapshotMetadata) -> Self {
        Self {
            id: meta.id.into(),
            timestamp: meta.created_at,
            author: meta.author,
            kind: meta.kind.as_str().to_string(),
            change_count: meta.change_count,
            employee_count: meta.employee_count,
            changes: meta.changes,
            description: meta.description,
            checksum: meta.checksum,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    #[serde(flatten)]
    pub summary: SnapshotSummaryDto,
    /// False when the stored roster no longer matches its checksum.
    pub checksum_valid: bool,
    pub employees: Vec<EmployeeDto>,
}

impl From<Snapshot> for SnapshotDto {
    fn from(snapshot: Snapshot) -> Self {
        let checksum_valid = snapshot.is_intact();
        let summary = snapshot.metadata().into();
        Self {
            summary,
            checksum_valid,
            employees: snapshot.employees.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntryDto {
    pub id: String,
    pub action: String,
    pub details: String,
    pub author: String,
    #[serde(with = "serde_time")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<ActivityLogEntry> for ActivityEntryDto {
    fn from(entry: ActivityLogEntry) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            details: entry.details,
            author: entry.author,
            timestamp: entry.timestamp,
            kind: entry.kind.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResultDto {
    pub success: bool,
    pub published_count: usize,
    pub version_id: String,
    pub total_employees: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RollbackResultDto {
    pub success: bool,
    pub version_id: String,
    pub employee_count: usize,
    pub backup_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResultDto {
    pub success: bool,
    pub employee_count: usize,
    /// Snapshot holding the roster that was replaced.
    pub backup_id: String,
}
