// src/application/commands/proposals/delete.rs
use super::ProposalCommandService;
use crate::{
    application::{
        authorization::ensure_capability, dto::AuthenticatedUser, error::ApplicationResult,
    },
    domain::proposal::ProposalId,
};

pub struct DeleteProposalCommand {
    pub id: String,
}

impl ProposalCommandService {
    pub async fn delete_proposal(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteProposalCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "proposals", "delete")?;
        let id = ProposalId::new(command.id)?;
        self.proposal_repo.delete(&id).await?;
        tracing::info!(proposal_id = %id, caller = %actor.id, "change proposal deleted");
        Ok(())
    }
}
