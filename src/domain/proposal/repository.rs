use crate::domain::errors::DomainResult;
use crate::domain::proposal::entity::{ChangeProposal, ProposalReview};
use crate::domain::proposal::value_objects::{ProposalId, ProposalStatus};
use async_trait::async_trait;

/// Append-mostly proposal log. Every mutation persists the whole updated
/// collection as one all-or-nothing write.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Insertion order, optionally restricted to one status.
    async fn list(&self, status: Option<ProposalStatus>) -> DomainResult<Vec<ChangeProposal>>;
    async fn find_by_id(&self, id: &ProposalId) -> DomainResult<Option<ChangeProposal>>;
    async fn insert(&self, proposal: ChangeProposal) -> DomainResult<ChangeProposal>;
    /// Fails with `NotFound` when `id` is unknown.
    async fn update_status(
        &self,
        id: &ProposalId,
        review: ProposalReview,
    ) -> DomainResult<ChangeProposal>;
    /// Applies `review` to every pending proposal in one write and returns
    /// the proposals that changed.
    async fn review_all_pending(&self, review: ProposalReview)
    -> DomainResult<Vec<ChangeProposal>>;
    /// Fails with `NotFound` when `id` is unknown.
    async fn delete(&self, id: &ProposalId) -> DomainResult<()>;
}
