// src/application/commands/publication/service.rs
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::{policy::PublishPolicy, time::Clock, util::IdGenerator},
    },
    domain::{
        employee::EmployeeRepository, proposal::ProposalRepository,
        publication::PublicationStore, snapshot::SnapshotRepository,
    },
};

/// Publish and rollback engines for one roster.
///
/// Both operations hold `roster_lock` for their whole read-compute-commit
/// sequence, so at most one of them runs at a time.
pub struct PublicationService {
    pub(super) employee_repo: Arc<dyn EmployeeRepository>,
    pub(super) proposal_repo: Arc<dyn ProposalRepository>,
    pub(super) snapshot_repo: Arc<dyn SnapshotRepository>,
    pub(super) store: Arc<dyn PublicationStore>,
    pub(super) policy: Arc<dyn PublishPolicy>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) roster_lock: Mutex<()>,
}

impl PublicationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        proposal_repo: Arc<dyn ProposalRepository>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
        store: Arc<dyn PublicationStore>,
        policy: Arc<dyn PublishPolicy>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            employee_repo,
            proposal_repo,
            snapshot_repo,
            store,
            policy,
            clock,
            ids,
            roster_lock: Mutex::new(()),
        }
    }

    pub fn can_publish(&self, caller: &AuthenticatedUser) -> bool {
        self.policy.can_publish(caller)
    }

    pub(super) fn authorize<'a>(
        &self,
        caller: Option<&'a AuthenticatedUser>,
    ) -> ApplicationResult<&'a AuthenticatedUser> {
        let caller =
            caller.ok_or_else(|| ApplicationError::unauthorized("caller identity required"))?;
        if !self.policy.can_publish(caller) {
            tracing::warn!(caller = %caller.id, role = %caller.role, "publish policy denied caller");
            return Err(ApplicationError::forbidden(
                "only super administrators may publish or roll back",
            ));
        }
        Ok(caller)
    }

    /// Explicit author from the request, else the caller's display name.
    pub(super) fn author_for(caller: &AuthenticatedUser, requested: Option<String>) -> String {
        requested
            .map(|author| author.trim().to_string())
            .filter(|author| !author.is_empty())
            .unwrap_or_else(|| caller.display_name().to_string())
    }
}
