// src/application/commands/publication/rollback.rs
use super::PublicationService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RollbackResultDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityKind, ActivityLogEntry},
        publication::RosterReplacement,
        snapshot::{Snapshot, SnapshotKind, VersionId},
    },
};

#[derive(Debug)]
pub struct RollbackCommand {
    pub version_id: String,
    pub author: Option<String>,
}

impl PublicationService {
    /// Restores the roster stored in `version_id`.
    ///
    /// The current roster is stored as a rollback-backup snapshot before the
    /// roster is replaced. Proposals are left untouched.
    pub async fn rollback(
        &self,
        caller: Option<&AuthenticatedUser>,
        command: RollbackCommand,
    ) -> ApplicationResult<RollbackResultDto> {
        let caller = self.authorize(caller)?;
        let author = Self::author_for(caller, command.author);
        if command.version_id.trim().is_empty() {
            return Err(ApplicationError::validation("version id is required"));
        }
        let target_id = VersionId::new(command.version_id.as_str()).map_err(|_| {
            ApplicationError::not_found(format!("version {} not found", command.version_id))
        })?;

        let _guard = self.roster_lock.lock().await;

        let target = self
            .snapshot_repo
            .find_by_id(&target_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("version {target_id} not found")))?;
        if !target.is_intact() {
            tracing::warn!(version_id = %target_id, "snapshot failed checksum verification");
            return Err(ApplicationError::conflict(format!(
                "version {target_id} failed checksum verification"
            )));
        }

        let current = self.employee_repo.list().await?;
        let now = self.clock.now();
        let backup_id =
            VersionId::generate(SnapshotKind::RollbackBackup, now, &self.ids.next_token())?;
        let note = format!("Backup before rollback to {target_id}");
        let backup = Snapshot::capture(
            backup_id.clone(),
            SnapshotKind::RollbackBackup,
            author.as_str(),
            now,
            &current,
            vec![note.clone()],
        )?
        .with_description(note);
        let base_checksum = backup.checksum.clone();

        self.snapshot_repo.insert(backup).await?;

        let employee_count = target.employees.len();
        let activity = ActivityLogEntry::new(
            self.ids.prefixed_id("activity", now),
            ActivityKind::Rollback,
            format!("Rolled back to version {target_id} ({employee_count} employees)"),
            author.as_str(),
            now,
        );

        self.store
            .commit_replacement(RosterReplacement {
                roster: target.employees,
                base_checksum,
                activity,
            })
            .await?;

        tracing::info!(
            version_id = %target_id,
            backup_id = %backup_id,
            employee_count,
            %author,
            "rolled back roster"
        );

        Ok(RollbackResultDto {
            success: true,
            version_id: target_id.into(),
            employee_count,
            backup_id: backup_id.into(),
        })
    }
}
