// src/domain/proposal/entity.rs
use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::value_objects::{ChangeKind, ProposalId, ProposalStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A requested add, edit or delete of a single employee.
///
/// `before` is kept for audit display only; applying the change uses
/// `employee_id` and `after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProposal {
    pub id: ProposalId,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Employee>,
    pub proposed_by: String,
    pub proposed_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ChangeProposal {
    /// Checks the shape invariants for the change type.
    pub fn validate(&self) -> DomainResult<()> {
        match self.kind {
            ChangeKind::Add => {
                if self.after.is_none() {
                    return Err(DomainError::Validation(
                        "add proposals require an `after` employee".into(),
                    ));
                }
            }
            ChangeKind::Edit => {
                let target = self.target_id()?;
                let after = self.after.as_ref().ok_or_else(|| {
                    DomainError::Validation("edit proposals require an `after` employee".into())
                })?;
                if &after.id != target {
                    return Err(DomainError::Validation(format!(
                        "edit proposals cannot change employee id ({target} -> {})",
                        after.id
                    )));
                }
            }
            ChangeKind::Delete => {
                self.target_id()?;
            }
        }

        if self.proposed_by.trim().is_empty() {
            return Err(DomainError::Validation("proposer cannot be empty".into()));
        }
        Ok(())
    }

    /// Identifier of the employee the change is about. For adds this is the
    /// id carried by `after`.
    pub fn target_id(&self) -> DomainResult<&EmployeeId> {
        match self.kind {
            ChangeKind::Add => self
                .after
                .as_ref()
                .map(|employee| &employee.id)
                .ok_or_else(|| {
                    DomainError::Validation("add proposals require an `after` employee".into())
                }),
            ChangeKind::Edit | ChangeKind::Delete => {
                self.employee_id.as_ref().ok_or_else(|| {
                    DomainError::Validation(format!(
                        "{} proposals require an employee id",
                        self.kind
                    ))
                })
            }
        }
    }

    /// One line for version change lists, e.g. `edit: Alice Smith`.
    pub fn summary_line(&self) -> String {
        let subject = self
            .after
            .as_ref()
            .or(self.before.as_ref())
            .map(Employee::display_name)
            .or_else(|| self.employee_id.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "unknown employee".to_string());
        format!("{}: {subject}", self.kind)
    }

    pub fn is_approved(&self) -> bool {
        self.status == ProposalStatus::Approved
    }

    pub fn apply_review(&mut self, review: &ProposalReview) {
        self.status = review.status;
        if let Some(notes) = &review.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(reviewer) = &review.reviewer {
            self.approved_by = Some(reviewer.clone());
        }
        if let Some(reviewed_at) = review.reviewed_at {
            self.approved_at = Some(reviewed_at);
        }
    }
}

/// A status transition. Re-applying the same status is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalReview {
    pub status: ProposalStatus,
    pub notes: Option<String>,
    pub reviewer: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ProposalReview {
    pub fn new(status: ProposalStatus) -> Self {
        Self {
            status,
            notes: None,
            reviewer: None,
            reviewed_at: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn reviewed_by(mut self, reviewer: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.reviewer = Some(reviewer.into());
        self.reviewed_at = Some(at);
        self
    }
}
