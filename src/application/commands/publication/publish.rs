// src/application/commands/publication/publish.rs
use super::PublicationService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PublishResultDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityKind, ActivityLogEntry},
        proposal::ProposalStatus,
        publication::{PublishCommit, apply_proposals},
        snapshot::{Snapshot, SnapshotKind, VersionId},
    },
};

#[derive(Debug, Default)]
pub struct PublishCommand {
    /// Overrides the caller's name in the snapshot and activity entry.
    pub author: Option<String>,
}

impl PublicationService {
    /// Applies every approved proposal to the roster as one batch.
    ///
    /// The pre-publish roster is captured as a snapshot, the new roster is
    /// computed in memory, and snapshot, roster, consumed proposals and the
    /// activity entry are then committed together. Nothing is written when
    /// any step fails.
    pub async fn publish(
        &self,
        caller: Option<&AuthenticatedUser>,
        command: PublishCommand,
    ) -> ApplicationResult<PublishResultDto> {
        let caller = self.authorize(caller)?;
        let author = Self::author_for(caller, command.author);

        let _guard = self.roster_lock.lock().await;

        let approved = self
            .proposal_repo
            .list(Some(ProposalStatus::Approved))
            .await?;
        if approved.is_empty() {
            tracing::warn!(%author, "publish requested with no approved changes");
            return Err(ApplicationError::NoChangesToPublish);
        }

        let roster = self.employee_repo.list().await?;
        let now = self.clock.now();
        let version_id = VersionId::generate(SnapshotKind::Publish, now, &self.ids.next_token())?;
        let changes = approved.iter().map(|p| p.summary_line()).collect();
        let snapshot = Snapshot::capture(
            version_id.clone(),
            SnapshotKind::Publish,
            author.as_str(),
            now,
            &roster,
            changes,
        )?;

        let updated = apply_proposals(roster, &approved)?;
        let total_employees = updated.len();
        let published_count = approved.len();

        let activity = ActivityLogEntry::new(
            self.ids.prefixed_id("activity", now),
            ActivityKind::Publish,
            format!("Published {published_count} changes ({version_id})"),
            author.as_str(),
            now,
        );

        self.store
            .commit_publish(PublishCommit {
                snapshot,
                roster: updated,
                consumed: approved.into_iter().map(|p| p.id).collect(),
                activity,
            })
            .await?;

        tracing::info!(
            version_id = %version_id,
            count = published_count,
            total_employees,
            %author,
            "published approved changes"
        );

        Ok(PublishResultDto {
            success: true,
            published_count,
            version_id: version_id.into(),
            total_employees,
        })
    }
}
