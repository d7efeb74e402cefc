// src/infrastructure/repositories/postgres/proposals.rs
use super::PostgresDirectoryStore;
use super::rows::{PROPOSAL_COLUMNS, ProposalRow};
use crate::domain::employee::Employee;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::{
    ChangeProposal, ProposalId, ProposalRepository, ProposalReview, ProposalStatus,
};
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::{PgConnection, types::Json};

async fn store_review(conn: &mut PgConnection, proposal: &ChangeProposal) -> DomainResult<()> {
    sqlx::query(
        "UPDATE change_proposals
         SET status = $2, approved_by = $3, approved_at = $4, notes = $5
         WHERE id = $1",
    )
    .bind(proposal.id.as_str())
    .bind(proposal.status.as_str())
    .bind(proposal.approved_by.as_deref())
    .bind(proposal.approved_at)
    .bind(proposal.notes.as_deref())
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl ProposalRepository for PostgresDirectoryStore {
    async fn list(&self, status: Option<ProposalStatus>) -> DomainResult<Vec<ChangeProposal>> {
        let rows = sqlx::query_as::<_, ProposalRow>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM change_proposals
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY seq"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ChangeProposal::try_from).collect()
    }

    async fn find_by_id(&self, id: &ProposalId) -> DomainResult<Option<ChangeProposal>> {
        let row = sqlx::query_as::<_, ProposalRow>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM change_proposals WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ChangeProposal::try_from).transpose()
    }

    async fn insert(&self, proposal: ChangeProposal) -> DomainResult<ChangeProposal> {
        sqlx::query(
            "INSERT INTO change_proposals (id, kind, employee_id, before, after, proposed_by,
                 proposed_at, status, approved_by, approved_at, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(proposal.id.as_str())
        .bind(proposal.kind.as_str())
        .bind(proposal.employee_id.as_ref().map(|id| id.as_str()))
        .bind(proposal.before.as_ref().map(Json::<&Employee>))
        .bind(proposal.after.as_ref().map(Json::<&Employee>))
        .bind(&proposal.proposed_by)
        .bind(proposal.proposed_at)
        .bind(proposal.status.as_str())
        .bind(proposal.approved_by.as_deref())
        .bind(proposal.approved_at)
        .bind(proposal.notes.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(proposal)
    }

    async fn update_status(
        &self,
        id: &ProposalId,
        review: ProposalReview,
    ) -> DomainResult<ChangeProposal> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let row = sqlx::query_as::<_, ProposalRow>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM change_proposals WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("proposal {id}")))?;

        let mut proposal = ChangeProposal::try_from(row)?;
        proposal.apply_review(&review);
        store_review(&mut tx, &proposal).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(proposal)
    }

    async fn review_all_pending(
        &self,
        review: ProposalReview,
    ) -> DomainResult<Vec<ChangeProposal>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let rows = sqlx::query_as::<_, ProposalRow>(&format!(
            "SELECT {PROPOSAL_COLUMNS} FROM change_proposals
             WHERE status = 'pending' ORDER BY seq FOR UPDATE"
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let mut reviewed = Vec::with_capacity(rows.len());
        for row in rows {
            let mut proposal = ChangeProposal::try_from(row)?;
            proposal.apply_review(&review);
            store_review(&mut tx, &proposal).await?;
            reviewed.push(proposal);
        }
        tx.commit().await.map_err(map_sqlx)?;
        Ok(reviewed)
    }

    async fn delete(&self, id: &ProposalId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM change_proposals WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("proposal {id}")));
        }
        Ok(())
    }
}
