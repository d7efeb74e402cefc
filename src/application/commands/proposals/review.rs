// src/application/commands/proposals/review.rs
use super::ProposalCommandService;
use crate::{
    application::{
        authorization::ensure_capability,
        dto::{AuthenticatedUser, ProposalDto},
        error::ApplicationResult,
    },
    domain::proposal::{ProposalId, ProposalReview, ProposalStatus},
};

pub struct ReviewProposalCommand {
    pub id: String,
    pub status: ProposalStatus,
    /// Replaces existing notes only when supplied.
    pub notes: Option<String>,
}

impl ProposalCommandService {
    /// Moves a proposal to `status`. Setting the same status again is allowed.
    /// Approvals and rejections record the reviewer and the review time.
    pub async fn review_proposal(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewProposalCommand,
    ) -> ApplicationResult<ProposalDto> {
        ensure_capability(actor, "proposals", "review")?;

        let id = ProposalId::new(command.id)?;
        let notes = command.notes.filter(|notes| !notes.trim().is_empty());
        let mut review = ProposalReview::new(command.status).with_notes(notes);
        if command.status != ProposalStatus::Pending {
            review = review.reviewed_by(actor.display_name(), self.clock.now());
        }

        let updated = self.proposal_repo.update_status(&id, review).await?;
        tracing::info!(
            proposal_id = %updated.id,
            status = %updated.status,
            reviewer = %actor.id,
            "change proposal reviewed"
        );
        Ok(updated.into())
    }
}
