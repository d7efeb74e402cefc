// src/infrastructure/repositories/json_file.rs
use super::state::{DirectoryState, StateBackedStore, StatePersistence};
use crate::domain::activity::{ACTIVITY_LOG_CAPACITY, ActivityLogEntry};
use crate::domain::employee::Employee;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::ChangeProposal;
use crate::domain::snapshot::{Snapshot, SnapshotKind, VersionId};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

const STATE_FILE: &str = "state.json";
const VERSIONS_DIR: &str = "versions";
const LEGACY_EMPLOYEES: &str = "employees.json";
const LEGACY_PROPOSALS: &str = "pending-changes.json";
const LEGACY_ACTIVITY: &str = "activity-log.json";

/// `DATA_DIR/state.json` plus one `DATA_DIR/versions/{id}.json` per snapshot.
/// Every file is written to a temporary sibling and renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFiles {
    root: PathBuf,
}

impl JsonFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    fn snapshot_path(&self, id: &VersionId) -> PathBuf {
        self.versions_dir().join(format!("{id}.json"))
    }

    /// First start against a data directory written by the older file layout:
    /// roster, proposals and activity each had their own file.
    async fn load_legacy_state(&self) -> DomainResult<DirectoryState> {
        let employees: Vec<Employee> = read_optional(&self.root.join(LEGACY_EMPLOYEES))
            .await?
            .unwrap_or_default();
        let proposals: Vec<ChangeProposal> = read_optional(&self.root.join(LEGACY_PROPOSALS))
            .await?
            .unwrap_or_default();
        let mut activity: Vec<ActivityLogEntry> = read_optional(&self.root.join(LEGACY_ACTIVITY))
            .await?
            .unwrap_or_default();
        activity.truncate(ACTIVITY_LOG_CAPACITY);

        if !employees.is_empty() {
            tracing::info!(
                employees = employees.len(),
                proposals = proposals.len(),
                "seeding directory state from legacy files"
            );
        }
        Ok(DirectoryState {
            employees,
            proposals,
            activity,
        })
    }

    async fn load_snapshots(&self) -> DomainResult<Vec<Snapshot>> {
        let dir = self.versions_dir();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(&dir, err)),
        };

        let mut loaded = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            loaded.push(read_snapshot(&path).await?);
        }
        // Files from older tooling have no sequence and sort first, by time.
        loaded.sort_by(|(seq_a, a), (seq_b, b)| {
            seq_a
                .cmp(seq_b)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(loaded.into_iter().map(|(_, snapshot)| snapshot).collect())
    }
}

/// Version file layout: the snapshot plus its creation-order position.
#[derive(Serialize)]
struct StoredSnapshot<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    sequence: u64,
}

/// Reads one version file. Fields that older tooling did not write are
/// derived; fields present in the file are kept as stored.
async fn read_snapshot(path: &Path) -> DomainResult<(Option<u64>, Snapshot)> {
    let raw: Value = read_json(path).await?;
    let sequence = raw.get("sequence").and_then(Value::as_u64);
    let has_kind = raw.get("kind").is_some();
    let has_change_count = raw.get("changeCount").is_some();

    let mut snapshot: Snapshot = serde_json::from_value(raw)
        .map_err(|err| DomainError::Persistence(format!("{}: {err}", path.display())))?;
    if !has_kind && snapshot.id.as_str().starts_with("rollback-backup") {
        snapshot.kind = SnapshotKind::RollbackBackup;
    }
    if !has_change_count {
        snapshot.change_count = snapshot.changes.len();
    }
    Ok((sequence, snapshot))
}

#[async_trait]
impl StatePersistence for JsonFiles {
    async fn load(&self) -> DomainResult<(DirectoryState, Vec<Snapshot>)> {
        fs::create_dir_all(self.versions_dir())
            .await
            .map_err(|err| io_error(&self.versions_dir(), err))?;

        let state = match read_optional(&self.state_path()).await? {
            Some(state) => state,
            None => {
                let seeded = self.load_legacy_state().await?;
                self.save_state(&seeded).await?;
                seeded
            }
        };
        let snapshots = self.load_snapshots().await?;
        Ok((state, snapshots))
    }

    async fn save_state(&self, state: &DirectoryState) -> DomainResult<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(DomainError::persistence)?;
        write_atomic(&self.state_path(), &bytes).await
    }

    async fn save_snapshot(&self, snapshot: &Snapshot, sequence: u64) -> DomainResult<()> {
        let path = self.snapshot_path(&snapshot.id);
        if fs::try_exists(&path).await.map_err(|err| io_error(&path, err))? {
            return Err(DomainError::Conflict(format!(
                "version {} already exists",
                snapshot.id
            )));
        }
        let bytes = serde_json::to_vec_pretty(&StoredSnapshot { snapshot, sequence })
            .map_err(DomainError::persistence)?;
        write_atomic(&path, &bytes).await
    }

    async fn discard_snapshot(&self, id: &VersionId) {
        let path = self.snapshot_path(id);
        if let Err(err) = fs::remove_file(&path).await {
            tracing::warn!(version_id = %id, error = %err, "could not remove uncommitted snapshot");
        }
    }
}

pub type JsonFileStore = StateBackedStore<JsonFiles>;

impl JsonFileStore {
    pub async fn open_dir(root: impl Into<PathBuf>) -> DomainResult<Self> {
        Self::open(JsonFiles::new(root)).await
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::Persistence(format!("{}: {err}", path.display()))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> DomainResult<T> {
    let bytes = fs::read(path).await.map_err(|err| io_error(path, err))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| DomainError::Persistence(format!("{}: {err}", path.display())))
}

async fn read_optional<T: DeserializeOwned>(path: &Path) -> DomainResult<Option<T>> {
    match fs::try_exists(path).await {
        Ok(true) => read_json(path).await.map(Some),
        Ok(false) => Ok(None),
        Err(err) => Err(io_error(path, err)),
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> DomainResult<()> {
    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp)
        .await
        .map_err(|err| io_error(&tmp, err))?;
    file.write_all(bytes)
        .await
        .map_err(|err| io_error(&tmp, err))?;
    file.sync_all().await.map_err(|err| io_error(&tmp, err))?;
    drop(file);
    fs::rename(&tmp, path)
        .await
        .map_err(|err| io_error(path, err))
}
