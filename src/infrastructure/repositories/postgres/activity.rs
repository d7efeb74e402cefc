// src/infrastructure/repositories/postgres/activity.rs
use super::PostgresDirectoryStore;
use super::rows::ActivityRow;
use crate::domain::activity::{ACTIVITY_LOG_CAPACITY, ActivityLogEntry, ActivityLogRepository};
use crate::domain::errors::DomainResult;
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::PgConnection;

/// Appends `entry` and evicts everything beyond the newest entries.
pub(super) async fn append_bounded(
    conn: &mut PgConnection,
    entry: &ActivityLogEntry,
) -> DomainResult<()> {
    sqlx::query(
        "INSERT INTO activity_log (id, action, details, author, created_at, kind)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&entry.id)
    .bind(&entry.action)
    .bind(&entry.details)
    .bind(&entry.author)
    .bind(entry.timestamp)
    .bind(entry.kind.as_str())
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    sqlx::query(
        "DELETE FROM activity_log
         WHERE seq NOT IN (SELECT seq FROM activity_log ORDER BY seq DESC LIMIT $1)",
    )
    .bind(ACTIVITY_LOG_CAPACITY as i64)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl ActivityLogRepository for PostgresDirectoryStore {
    async fn append(&self, entry: ActivityLogEntry) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        append_bounded(&mut tx, &entry).await?;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn list(&self) -> DomainResult<Vec<ActivityLogEntry>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT id, action, details, author, created_at, kind
             FROM activity_log ORDER BY seq DESC LIMIT $1",
        )
        .bind(ACTIVITY_LOG_CAPACITY as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
