// src/application/commands/proposals/approve_all.rs
use super::ProposalCommandService;
use crate::{
    application::{
        authorization::ensure_capability,
        dto::{ApproveAllResultDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::proposal::{ProposalReview, ProposalStatus},
};

impl ProposalCommandService {
    /// Approves every pending proposal in a single write.
    pub async fn approve_all_pending(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<ApproveAllResultDto> {
        ensure_capability(actor, "proposals", "review")?;

        let review = ProposalReview::new(ProposalStatus::Approved)
            .reviewed_by(actor.display_name(), self.clock.now());
        let approved = self.proposal_repo.review_all_pending(review).await?;

        tracing::info!(count = approved.len(), reviewer = %actor.id, "approved all pending proposals");
        Ok(ApproveAllResultDto {
            approved_count: approved.len(),
            proposals: approved.into_iter().map(Into::into).collect(),
        })
    }
}
