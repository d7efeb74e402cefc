// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{proposals::ProposalCommandService, publication::PublicationService},
        dto::{AuthenticatedUser, CallerDto},
        ports::{
            policy::PublishPolicy, security::TokenAuthenticator, time::Clock, util::IdGenerator,
        },
        queries::{
            directory::DirectoryQueryService, history::HistoryQueryService,
            proposals::ProposalQueryService,
        },
    },
    domain::{
        activity::ActivityLogRepository, employee::EmployeeRepository,
        proposal::ProposalRepository, publication::PublicationStore,
        snapshot::SnapshotRepository,
    },
};

/// Storage handles a backend hands to the application layer. A single
/// backend normally implements every trait, so each field is usually a
/// clone of the same `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub employees: Arc<dyn EmployeeRepository>,
    pub proposals: Arc<dyn ProposalRepository>,
    pub snapshots: Arc<dyn SnapshotRepository>,
    pub activity: Arc<dyn ActivityLogRepository>,
    pub publication: Arc<dyn PublicationStore>,
}

impl Repositories {
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: EmployeeRepository
            + ProposalRepository
            + SnapshotRepository
            + ActivityLogRepository
            + PublicationStore
            + 'static,
    {
        Self {
            employees: backend.clone(),
            proposals: backend.clone(),
            snapshots: backend.clone(),
            activity: backend.clone(),
            publication: backend,
        }
    }
}

pub struct ApplicationServices {
    pub proposal_commands: Arc<ProposalCommandService>,
    pub publication: Arc<PublicationService>,
    pub directory_queries: Arc<DirectoryQueryService>,
    pub proposal_queries: Arc<ProposalQueryService>,
    pub history_queries: Arc<HistoryQueryService>,
    authenticator: Arc<dyn TokenAuthenticator>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        authenticator: Arc<dyn TokenAuthenticator>,
        policy: Arc<dyn PublishPolicy>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let proposal_commands = Arc::new(ProposalCommandService::new(
            Arc::clone(&repos.proposals),
            Arc::clone(&repos.employees),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));

        let publication = Arc::new(PublicationService::new(
            Arc::clone(&repos.employees),
            Arc::clone(&repos.proposals),
            Arc::clone(&repos.snapshots),
            Arc::clone(&repos.publication),
            policy,
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));

        let directory_queries = Arc::new(DirectoryQueryService::new(Arc::clone(&repos.employees)));
        let proposal_queries = Arc::new(ProposalQueryService::new(Arc::clone(&repos.proposals)));
        let history_queries = Arc::new(HistoryQueryService::new(
            Arc::clone(&repos.snapshots),
            Arc::clone(&repos.activity),
        ));

        Self {
            proposal_commands,
            publication,
            directory_queries,
            proposal_queries,
            history_queries,
            authenticator,
        }
    }

    /// Resolve a raw bearer token to its caller.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.authenticator.authenticate(token).await
    }

    pub fn describe_caller(&self, caller: &AuthenticatedUser) -> CallerDto {
        CallerDto::from_caller(caller, self.publication.can_publish(caller))
    }
}
