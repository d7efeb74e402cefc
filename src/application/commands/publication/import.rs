// src/application/commands/publication/import.rs
use std::collections::HashSet;

use super::PublicationService;
use crate::{
    application::{
        dto::{AuthenticatedUser, EmployeeInput, ImportResultDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityKind, ActivityLogEntry},
        employee::Employee,
        publication::RosterReplacement,
        snapshot::{Snapshot, SnapshotKind, VersionId},
    },
};

#[derive(Debug, Default)]
pub struct ImportRosterCommand {
    pub employees: Vec<EmployeeInput>,
    pub author: Option<String>,
}

impl PublicationService {
    /// Replaces the whole roster with `command.employees`, bypassing review.
    ///
    /// Same authorization as publish. The replaced roster is kept as an
    /// `import` snapshot so the import can be undone with a rollback.
    /// Proposals are left untouched.
    pub async fn import_roster(
        &self,
        caller: Option<&AuthenticatedUser>,
        command: ImportRosterCommand,
    ) -> ApplicationResult<ImportResultDto> {
        let caller = self.authorize(caller)?;
        let author = Self::author_for(caller, command.author);

        let _guard = self.roster_lock.lock().await;

        let now = self.clock.now();
        let roster = command
            .employees
            .into_iter()
            .map(|input| input.into_employee(|| self.ids.prefixed_id("emp", now)))
            .collect::<ApplicationResult<Vec<Employee>>>()?;
        let mut seen = HashSet::new();
        if let Some(duplicate) = roster.iter().find(|employee| !seen.insert(&employee.id)) {
            return Err(ApplicationError::validation(format!(
                "employee id {} appears more than once",
                duplicate.id
            )));
        }

        let current = self.employee_repo.list().await?;
        let backup_id = VersionId::generate(SnapshotKind::Import, now, &self.ids.next_token())?;
        let employee_count = roster.len();
        let note = format!("Backup before roster import ({employee_count} employees)");
        let backup = Snapshot::capture(
            backup_id.clone(),
            SnapshotKind::Import,
            author.as_str(),
            now,
            &current,
            vec![note.clone()],
        )?
        .with_description(note);
        let base_checksum = backup.checksum.clone();

        self.snapshot_repo.insert(backup).await?;

        let activity = ActivityLogEntry::new(
            self.ids.prefixed_id("activity", now),
            ActivityKind::Import,
            format!("Imported roster of {employee_count} employees (backup {backup_id})"),
            author.as_str(),
            now,
        );
        self.store
            .commit_replacement(RosterReplacement {
                roster,
                base_checksum,
                activity,
            })
            .await?;

        tracing::info!(backup_id = %backup_id, employee_count, %author, "imported roster");

        Ok(ImportResultDto {
            success: true,
            employee_count,
            backup_id: backup_id.into(),
        })
    }
}
