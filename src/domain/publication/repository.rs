use crate::domain::activity::ActivityLogEntry;
use crate::domain::employee::Employee;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::ProposalId;
use crate::domain::snapshot::{Snapshot, roster_checksum};
use async_trait::async_trait;

/// Everything a successful publish changes, committed as one unit.
#[derive(Debug, Clone)]
pub struct PublishCommit {
    /// Pre-publish roster copy. Its checksum is also the roster the commit
    /// expects to replace.
    pub snapshot: Snapshot,
    /// Roster after every approved proposal was applied.
    pub roster: Vec<Employee>,
    /// Proposals consumed by this publish. Proposals created or re-reviewed
    /// while the publish ran are not listed and therefore survive.
    pub consumed: Vec<ProposalId>,
    pub activity: ActivityLogEntry,
}

/// Whole-roster swap plus its log entry, used by rollback and roster import.
/// The backup snapshot is stored separately, before this commit is attempted.
#[derive(Debug, Clone)]
pub struct RosterReplacement {
    pub roster: Vec<Employee>,
    /// Checksum of the roster the replacement was prepared against.
    pub base_checksum: String,
    pub activity: ActivityLogEntry,
}

/// Unit of work spanning roster, proposals, snapshots and activity log.
///
/// Implementations must make each commit all-or-nothing and make readers
/// observe either the state before or the state after it. A commit prepared
/// against state that has since changed fails with `Conflict`: the current
/// roster must still hash to the expected checksum, and every consumed
/// proposal must still be stored as approved.
#[async_trait]
pub trait PublicationStore: Send + Sync {
    async fn commit_publish(&self, commit: PublishCommit) -> DomainResult<()>;
    async fn commit_replacement(&self, commit: RosterReplacement) -> DomainResult<()>;
}

/// Fails with `Conflict` unless `current` is the roster a commit was built on.
pub fn ensure_roster_unchanged(current: &[Employee], expected_checksum: &str) -> DomainResult<()> {
    if roster_checksum(current)? != expected_checksum {
        return Err(DomainError::Conflict(
            "roster changed while the operation was being prepared; retry".into(),
        ));
    }
    Ok(())
}
