// src/infrastructure/repositories/postgres/publication.rs
use super::activity::append_bounded;
use super::employees::{load_roster, replace_roster};
use super::snapshots::insert_snapshot;
use super::{PostgresDirectoryStore, ROSTER_LOCK_KEY};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publication::{
    PublicationStore, PublishCommit, RosterReplacement, ensure_roster_unchanged,
};
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, Transaction};

impl PostgresDirectoryStore {
    /// Opens a transaction holding the roster lock and checks that the roster
    /// is still the one the commit was prepared against. Another instance may
    /// have committed between the caller's reads and this point.
    async fn begin_locked(&self, expected_checksum: &str) -> DomainResult<Transaction<'_, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        lock_roster(&mut tx).await?;
        let current = load_roster(&mut tx).await?;
        ensure_roster_unchanged(&current, expected_checksum)?;
        Ok(tx)
    }
}

async fn lock_roster(conn: &mut PgConnection) -> DomainResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(ROSTER_LOCK_KEY)
        .execute(conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl PublicationStore for PostgresDirectoryStore {
    async fn commit_publish(&self, commit: PublishCommit) -> DomainResult<()> {
        let consumed: Vec<String> = commit
            .consumed
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        let mut tx = self.begin_locked(&commit.snapshot.checksum).await?;
        let removed = sqlx::query(
            "DELETE FROM change_proposals WHERE id = ANY($1) AND status = 'approved'",
        )
        .bind(&consumed)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if removed.rows_affected() != consumed.len() as u64 {
            // Dropping `tx` rolls the delete back.
            return Err(DomainError::Conflict(
                "approved proposals changed while the publish was being prepared; retry".into(),
            ));
        }
        insert_snapshot(&mut tx, &commit.snapshot).await?;
        replace_roster(&mut tx, &commit.roster).await?;
        append_bounded(&mut tx, &commit.activity).await?;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn commit_replacement(&self, commit: RosterReplacement) -> DomainResult<()> {
        let mut tx = self.begin_locked(&commit.base_checksum).await?;
        replace_roster(&mut tx, &commit.roster).await?;
        append_bounded(&mut tx, &commit.activity).await?;
        tx.commit().await.map_err(map_sqlx)
    }
}
