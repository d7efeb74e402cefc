// src/domain/snapshot/entity.rs
use crate::domain::employee::Employee;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionId(String);

impl VersionId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("version id cannot be empty".into()));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::Validation(format!(
                "version id '{value}' contains unsupported characters"
            )));
        }
        Ok(Self(value))
    }

    /// Builds a time-derived id: `{prefix}-{unix millis}-{token}`.
    pub fn generate(kind: SnapshotKind, at: DateTime<Utc>, token: &str) -> DomainResult<Self> {
        Self::new(format!(
            "{}-{}-{token}",
            kind.id_prefix(),
            at.timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VersionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionId> for String {
    fn from(value: VersionId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKind {
    /// Roster as it was immediately before a publish.
    #[default]
    Publish,
    /// Roster as it was immediately before a rollback.
    RollbackBackup,
    /// Roster as it was immediately before a bulk import replaced it.
    Import,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::Publish => "publish",
            SnapshotKind::RollbackBackup => "rollback-backup",
            SnapshotKind::Import => "import",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            SnapshotKind::Publish => "v",
            SnapshotKind::RollbackBackup => "rollback-backup",
            SnapshotKind::Import => "import-backup",
        }
    }
}

impl std::str::FromStr for SnapshotKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publish" => Ok(SnapshotKind::Publish),
            "rollback-backup" => Ok(SnapshotKind::RollbackBackup),
            "import" => Ok(SnapshotKind::Import),
            other => Err(DomainError::Validation(format!("unknown snapshot kind '{other}'"))),
        }
    }
}

/// Immutable full copy of the roster. Only created and read, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: VersionId,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub kind: SnapshotKind,
    #[serde(default)]
    pub change_count: usize,
    pub employee_count: usize,
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub checksum: String,
    pub employees: Vec<Employee>,
}

impl Snapshot {
    /// Copies `roster` into a new snapshot and seals it with a checksum.
    pub fn capture(
        id: VersionId,
        kind: SnapshotKind,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
        roster: &[Employee],
        changes: Vec<String>,
    ) -> DomainResult<Self> {
        let employees = roster.to_vec();
        let checksum = roster_checksum(&employees)?;
        Ok(Self {
            id,
            created_at,
            author: author.into(),
            kind,
            change_count: changes.len(),
            employee_count: employees.len(),
            changes,
            description: None,
            checksum,
            employees,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn verify_checksum(&self) -> bool {
        roster_checksum(&self.employees).is_ok_and(|digest| digest == self.checksum)
    }

    /// Snapshots imported without a checksum are trusted as-is.
    pub fn is_intact(&self) -> bool {
        self.checksum.is_empty() || self.verify_checksum()
    }

    pub fn metadata(&self) -> SnapshotMetadata {
        SnapshotMetadata {
            id: self.id.clone(),
            created_at: self.created_at,
            author: self.author.clone(),
            kind: self.kind,
            change_count: self.change_count,
            employee_count: self.employee_count,
            changes: self.changes.clone(),
            description: self.description.clone(),
            checksum: self.checksum.clone(),
        }
    }
}

/// Listing view of a snapshot without the roster payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMetadata {
    pub id: VersionId,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub kind: SnapshotKind,
    pub change_count: usize,
    pub employee_count: usize,
    pub changes: Vec<String>,
    pub description: Option<String>,
    pub checksum: String,
}

/// BLAKE3 hex digest of the canonical JSON encoding of a roster.
pub fn roster_checksum(employees: &[Employee]) -> DomainResult<String> {
    let bytes = serde_json::to_vec(employees).map_err(DomainError::persistence)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
