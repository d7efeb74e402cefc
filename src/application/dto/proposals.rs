use crate::domain::proposal::ChangeProposal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmployeeDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDto {
    pub id: String,
    /// `add`, `edit` or `delete`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<EmployeeDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<EmployeeDto>,
    pub proposed_by: String,
    #[serde(with = "serde_time")]
    pub proposed_at: DateTime<Utc>,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(
        default,
        with = "serde_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<ChangeProposal> for ProposalDto {
    fn from(proposal: ChangeProposal) -> Self {
        Self {
            id: proposal.id.into(),
            kind: proposal.kind.as_str().to_string(),
            employee_id: proposal.employee_id.map(Into::into),
            before: proposal.before.map(Into::into),
            after: proposal.after.map(Into::into),
            proposed_by: proposal.proposed_by,
            proposed_at: proposal.proposed_at,
            status: proposal.status.as_str().to_string(),
            approved_by: proposal.approved_by,
            approved_at: proposal.approved_at,
            notes: proposal.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveAllResultDto {
    pub approved_count: usize,
    pub proposals: Vec<ProposalDto>,
}
