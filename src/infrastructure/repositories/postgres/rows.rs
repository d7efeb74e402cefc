// src/infrastructure/repositories/postgres/rows.rs
use crate::domain::activity::{ActivityKind, ActivityLogEntry};
use crate::domain::employee::{Employee, EmployeeId, Location, PersonName};
use crate::domain::errors::DomainError;
use crate::domain::proposal::{ChangeProposal, ProposalId};
use crate::domain::snapshot::{Snapshot, SnapshotMetadata, VersionId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, types::Json};

pub(super) const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, extension, \
     phone_number, location, team, department, title, photo_url";

pub(super) const PROPOSAL_COLUMNS: &str = "id, kind, employee_id, before, after, proposed_by, \
     proposed_at, status, approved_by, approved_at, notes";

pub(super) const SNAPSHOT_META_COLUMNS: &str =
    "id, created_at, author, kind, change_count, employee_count, changes, description, checksum";

#[derive(Debug, FromRow)]
pub(super) struct EmployeeRow {
    id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    extension: Option<String>,
    phone_number: Option<String>,
    location: String,
    team: Option<String>,
    department: Option<String>,
    title: Option<String>,
    photo_url: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let mut employee = Employee::new(
            EmployeeId::new(row.id)?,
            PersonName::new(row.first_name)?,
            PersonName::new(row.last_name)?,
            Location::new(row.location)?,
        );
        employee.email = row.email;
        employee.extension = row.extension;
        employee.phone_number = row.phone_number;
        employee.team = row.team;
        employee.department = row.department;
        employee.title = row.title;
        employee.photo_url = row.photo_url;
        Ok(employee)
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ProposalRow {
    id: String,
    kind: String,
    employee_id: Option<String>,
    before: Option<Json<Employee>>,
    after: Option<Json<Employee>>,
    proposed_by: String,
    proposed_at: DateTime<Utc>,
    status: String,
    approved_by: Option<String>,
    approved_at: Option<DateTime<Utc>>,
    notes: Option<String>,
}

impl TryFrom<ProposalRow> for ChangeProposal {
    type Error = DomainError;

    fn try_from(row: ProposalRow) -> Result<Self, Self::Error> {
        Ok(ChangeProposal {
            id: ProposalId::new(row.id)?,
            kind: row.kind.parse()?,
            employee_id: row.employee_id.map(EmployeeId::new).transpose()?,
            before: row.before.map(|json| json.0),
            after: row.after.map(|json| json.0),
            proposed_by: row.proposed_by,
            proposed_at: row.proposed_at,
            status: row.status.parse()?,
            approved_by: row.approved_by,
            approved_at: row.approved_at,
            notes: row.notes,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SnapshotMetaRow {
    id: String,
    created_at: DateTime<Utc>,
    author: String,
    kind: String,
    change_count: i64,
    employee_count: i64,
    changes: Json<Vec<String>>,
    description: Option<String>,
    checksum: String,
}

impl TryFrom<SnapshotMetaRow> for SnapshotMetadata {
    type Error = DomainError;

    fn try_from(row: SnapshotMetaRow) -> Result<Self, Self::Error> {
        Ok(SnapshotMetadata {
            id: VersionId::new(row.id)?,
            created_at: row.created_at,
            author: row.author,
            kind: row.kind.parse()?,
            change_count: usize::try_from(row.change_count).map_err(DomainError::persistence)?,
            employee_count: usize::try_from(row.employee_count)
                .map_err(DomainError::persistence)?,
            changes: row.changes.0,
            description: row.description,
            checksum: row.checksum,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SnapshotRow {
    #[sqlx(flatten)]
    meta: SnapshotMetaRow,
    employees: Json<Vec<Employee>>,
}

impl TryFrom<SnapshotRow> for Snapshot {
    type Error = DomainError;

    fn try_from(row: SnapshotRow) -> Result<Self, Self::Error> {
        let meta = SnapshotMetadata::try_from(row.meta)?;
        Ok(Snapshot {
            id: meta.id,
            created_at: meta.created_at,
            author: meta.author,
            kind: meta.kind,
            change_count: meta.change_count,
            employee_count: meta.employee_count,
            changes: meta.changes,
            description: meta.description,
            checksum: meta.checksum,
            employees: row.employees.0,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ActivityRow {
    id: String,
    action: String,
    details: String,
    author: String,
    created_at: DateTime<Utc>,
    kind: String,
}

impl From<ActivityRow> for ActivityLogEntry {
    fn from(row: ActivityRow) -> Self {
        ActivityLogEntry {
            id: row.id,
            action: row.action,
            details: row.details,
            author: row.author,
            timestamp: row.created_at,
            kind: ActivityKind::parse(&row.kind),
        }
    }
}
