// src/application/commands/proposals/service.rs
use std::sync::Arc;

use crate::{
    application::ports::{time::Clock, util::IdGenerator},
    domain::{employee::EmployeeRepository, proposal::ProposalRepository},
};

pub struct ProposalCommandService {
    pub(super) proposal_repo: Arc<dyn ProposalRepository>,
    pub(super) employee_repo: Arc<dyn EmployeeRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
}

impl ProposalCommandService {
    pub fn new(
        proposal_repo: Arc<dyn ProposalRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            proposal_repo,
            employee_repo,
            clock,
            ids,
        }
    }
}
