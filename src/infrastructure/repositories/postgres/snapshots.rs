// src/infrastructure/repositories/postgres/snapshots.rs
use super::PostgresDirectoryStore;
use super::rows::{SNAPSHOT_META_COLUMNS, SnapshotMetaRow, SnapshotRow};
use crate::domain::errors::DomainResult;
use crate::domain::snapshot::{Snapshot, SnapshotMetadata, SnapshotRepository, VersionId};
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::{PgConnection, types::Json};

pub(super) async fn insert_snapshot(
    conn: &mut PgConnection,
    snapshot: &Snapshot,
) -> DomainResult<()> {
    sqlx::query(
        "INSERT INTO snapshots (id, created_at, author, kind, change_count, employee_count,
             changes, description, checksum, employees)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(snapshot.id.as_str())
    .bind(snapshot.created_at)
    .bind(&snapshot.author)
    .bind(snapshot.kind.as_str())
    .bind(snapshot.change_count as i64)
    .bind(snapshot.employee_count as i64)
    .bind(Json(&snapshot.changes))
    .bind(snapshot.description.as_deref())
    .bind(&snapshot.checksum)
    .bind(Json(&snapshot.employees))
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl SnapshotRepository for PostgresDirectoryStore {
    async fn insert(&self, snapshot: Snapshot) -> DomainResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        insert_snapshot(&mut conn, &snapshot).await
    }

    async fn find_by_id(&self, id: &VersionId) -> DomainResult<Option<Snapshot>> {
        let row = sqlx::query_as::<_, SnapshotRow>(&format!(
            "SELECT {SNAPSHOT_META_COLUMNS}, employees FROM snapshots WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Snapshot::try_from).transpose()
    }

    async fn list_metadata(&self) -> DomainResult<Vec<SnapshotMetadata>> {
        let rows = sqlx::query_as::<_, SnapshotMetaRow>(&format!(
            "SELECT {SNAPSHOT_META_COLUMNS} FROM snapshots ORDER BY created_at DESC, seq DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(SnapshotMetadata::try_from).collect()
    }
}
