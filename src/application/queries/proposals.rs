// src/application/queries/proposals.rs
use std::sync::Arc;

use crate::{
    application::{
        authorization::ensure_capability,
        dto::{AuthenticatedUser, ProposalDto},
        error::ApplicationResult,
    },
    domain::proposal::{ProposalRepository, ProposalStatus},
};

pub struct ProposalQueryService {
    proposal_repo: Arc<dyn ProposalRepository>,
}

impl ProposalQueryService {
    pub fn new(proposal_repo: Arc<dyn ProposalRepository>) -> Self {
        Self { proposal_repo }
    }

    /// Proposals in insertion order, optionally restricted to one status.
    pub async fn list_proposals(
        &self,
        actor: &AuthenticatedUser,
        status: Option<ProposalStatus>,
    ) -> ApplicationResult<Vec<ProposalDto>> {
        ensure_capability(actor, "proposals", "read")?;
        let proposals = self.proposal_repo.list(status).await?;
        Ok(proposals.into_iter().map(Into::into).collect())
    }
}
