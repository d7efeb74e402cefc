// src/application/commands/proposals/create.rs
use super::ProposalCommandService;
use crate::{
    application::{
        authorization::ensure_capability,
        dto::{AuthenticatedUser, EmployeeInput, ProposalDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        employee::{Employee, EmployeeId},
        proposal::{ChangeKind, ChangeProposal, ProposalId, ProposalStatus},
    },
};

pub struct CreateProposalCommand {
    pub kind: ChangeKind,
    /// Target of an edit or delete. Edits may instead carry it as `employee.id`.
    pub employee_id: Option<String>,
    pub employee: Option<EmployeeInput>,
    pub notes: Option<String>,
}

impl CreateProposalCommand {
    pub fn builder(kind: ChangeKind) -> CreateProposalCommandBuilder {
        CreateProposalCommandBuilder {
            kind,
            employee_id: None,
            employee: None,
            notes: None,
        }
    }
}

pub struct CreateProposalCommandBuilder {
    kind: ChangeKind,
    employee_id: Option<String>,
    employee: Option<EmployeeInput>,
    notes: Option<String>,
}

impl CreateProposalCommandBuilder {
    pub fn employee_id(mut self, id: impl Into<String>) -> Self {
        self.employee_id = Some(id.into());
        self
    }

    pub fn employee(mut self, employee: EmployeeInput) -> Self {
        self.employee = Some(employee);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> Result<CreateProposalCommand, &'static str> {
        match self.kind {
            ChangeKind::Add | ChangeKind::Edit if self.employee.is_none() => {
                return Err("employee is required for add and edit");
            }
            ChangeKind::Delete if self.employee_id.is_none() => {
                return Err("employee_id is required for delete");
            }
            _ => {}
        }
        Ok(CreateProposalCommand {
            kind: self.kind,
            employee_id: self.employee_id,
            employee: self.employee,
            notes: self.notes,
        })
    }
}

impl ProposalCommandService {
    /// Records a pending change. Edits and deletes capture the current record
    /// as `before`; the roster itself is not touched.
    pub async fn create_proposal(
        &self,
        actor: &AuthenticatedUser,
        command: CreateProposalCommand,
    ) -> ApplicationResult<ProposalDto> {
        ensure_capability(actor, "proposals", "create")?;

        let now = self.clock.now();
        let id = ProposalId::new(self.ids.prefixed_id("change", now))?;

        let (employee_id, before, after) = match command.kind {
            ChangeKind::Add => {
                let input = command
                    .employee
                    .ok_or_else(|| ApplicationError::validation("add requires an employee"))?;
                let after = input.into_employee(|| self.ids.prefixed_id("emp", now))?;
                (None, None, Some(after))
            }
            ChangeKind::Edit => {
                let input = command
                    .employee
                    .ok_or_else(|| ApplicationError::validation("edit requires an employee"))?;
                let target = match command.employee_id {
                    Some(id) => EmployeeId::new(id)?,
                    None => EmployeeId::new(input.require_id()?)?,
                };
                let before = self.current_record(&target).await?;
                let fallback = target.to_string();
                let after = input.into_employee(|| fallback)?;
                (Some(target), Some(before), Some(after))
            }
            ChangeKind::Delete => {
                let target = command
                    .employee_id
                    .ok_or_else(|| ApplicationError::validation("delete requires an employee id"))
                    .and_then(|id| EmployeeId::new(id).map_err(Into::into))?;
                let before = self.current_record(&target).await?;
                (Some(target), Some(before), None)
            }
        };

        let proposal = ChangeProposal {
            id,
            kind: command.kind,
            employee_id,
            before,
            after,
            proposed_by: actor.display_name().to_string(),
            proposed_at: now,
            status: ProposalStatus::Pending,
            approved_by: None,
            approved_at: None,
            notes: command.notes.filter(|notes| !notes.trim().is_empty()),
        };
        proposal.validate()?;

        let created = self.proposal_repo.insert(proposal).await?;
        tracing::info!(
            proposal_id = %created.id,
            kind = %created.kind,
            proposed_by = %created.proposed_by,
            "change proposal created"
        );
        Ok(created.into())
    }

    async fn current_record(&self, id: &EmployeeId) -> ApplicationResult<Employee> {
        self.employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("employee {id} not found")))
    }
}
