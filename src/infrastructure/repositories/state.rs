// src/infrastructure/repositories/state.rs
//! Whole-state store shared by the in-memory and JSON-file backends.
//!
//! Writers are serialized by `write_gate`, build the next state on a clone,
//! persist it, and only then swap it in. Readers take the `RwLock` briefly and
//! never observe a state that failed to persist.
use crate::domain::activity::{ActivityLogEntry, ActivityLogRepository, push_bounded};
use crate::domain::employee::{Employee, EmployeeId, EmployeeRepository};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::{
    ChangeProposal, ProposalId, ProposalRepository, ProposalReview, ProposalStatus,
};
use crate::domain::publication::{
    PublicationStore, PublishCommit, RosterReplacement, ensure_roster_unchanged,
};
use crate::domain::snapshot::{Snapshot, SnapshotMetadata, SnapshotRepository, VersionId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryState {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub proposals: Vec<ChangeProposal>,
    /// Newest first.
    #[serde(default)]
    pub activity: Vec<ActivityLogEntry>,
}

/// Durable side of a [`StateBackedStore`].
#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// Snapshots are returned oldest first.
    async fn load(&self) -> DomainResult<(DirectoryState, Vec<Snapshot>)>;
    /// Replaces the stored state in one all-or-nothing write.
    async fn save_state(&self, state: &DirectoryState) -> DomainResult<()>;
    /// `sequence` is the snapshot's position in creation order; `load`
    /// returns snapshots in that order.
    async fn save_snapshot(&self, snapshot: &Snapshot, sequence: u64) -> DomainResult<()>;
    /// Best-effort removal of a snapshot whose commit failed.
    async fn discard_snapshot(&self, id: &VersionId);
}

pub struct StateBackedStore<P> {
    persistence: P,
    write_gate: Mutex<()>,
    state: RwLock<DirectoryState>,
    snapshots: RwLock<Vec<Snapshot>>,
}

impl<P: StatePersistence> StateBackedStore<P> {
    pub async fn open(persistence: P) -> DomainResult<Self> {
        let (state, snapshots) = persistence.load().await?;
        tracing::debug!(
            employees = state.employees.len(),
            proposals = state.proposals.len(),
            snapshots = snapshots.len(),
            "directory state loaded"
        );
        Ok(Self::from_parts(persistence, state, snapshots))
    }

    pub(super) fn from_parts(
        persistence: P,
        state: DirectoryState,
        snapshots: Vec<Snapshot>,
    ) -> Self {
        Self {
            persistence,
            write_gate: Mutex::new(()),
            state: RwLock::new(state),
            snapshots: RwLock::new(snapshots),
        }
    }

    async fn read<T>(&self, f: impl FnOnce(&DirectoryState) -> T) -> T {
        let state = self.state.read().await;
        f(&state)
    }

    /// Applies `f` to a copy of the state, persists the copy, then publishes it.
    async fn mutate<T, F>(&self, f: F) -> DomainResult<T>
    where
        F: FnOnce(&mut DirectoryState) -> DomainResult<T> + Send,
        T: Send,
    {
        let _writer = self.write_gate.lock().await;
        let mut next = self.state.read().await.clone();
        let out = f(&mut next)?;
        self.persistence.save_state(&next).await?;
        *self.state.write().await = next;
        Ok(out)
    }

    /// Creation-order position for a new snapshot. Callers hold `write_gate`.
    async fn next_snapshot_sequence(&self, id: &VersionId) -> DomainResult<u64> {
        let snapshots = self.snapshots.read().await;
        if snapshots.iter().any(|s| &s.id == id) {
            return Err(DomainError::Conflict(format!("version {id} already exists")));
        }
        Ok(snapshots.len() as u64)
    }
}

#[async_trait]
impl<P: StatePersistence> EmployeeRepository for StateBackedStore<P> {
    async fn list(&self) -> DomainResult<Vec<Employee>> {
        Ok(self.read(|state| state.employees.clone()).await)
    }

    async fn find_by_id(&self, id: &EmployeeId) -> DomainResult<Option<Employee>> {
        Ok(self
            .read(|state| state.employees.iter().find(|e| &e.id == id).cloned())
            .await)
    }

    async fn insert(&self, employee: Employee) -> DomainResult<Employee> {
        self.mutate(move |state| {
            if state.employees.iter().any(|e| e.id == employee.id) {
                return Err(DomainError::Conflict(format!(
                    "employee {} already exists",
                    employee.id
                )));
            }
            state.employees.push(employee.clone());
            Ok(employee)
        })
        .await
    }
}

#[async_trait]
impl<P: StatePersistence> ProposalRepository for StateBackedStore<P> {
    async fn list(&self, status: Option<ProposalStatus>) -> DomainResult<Vec<ChangeProposal>> {
        Ok(self
            .read(|state| {
                state
                    .proposals
                    .iter()
                    .filter(|p| status.is_none_or(|wanted| p.status == wanted))
                    .cloned()
                    .collect()
            })
            .await)
    }

    async fn find_by_id(&self, id: &ProposalId) -> DomainResult<Option<ChangeProposal>> {
        Ok(self
            .read(|state| state.proposals.iter().find(|p| &p.id == id).cloned())
            .await)
    }

    async fn insert(&self, proposal: ChangeProposal) -> DomainResult<ChangeProposal> {
        self.mutate(move |state| {
            if state.proposals.iter().any(|p| p.id == proposal.id) {
                return Err(DomainError::Conflict(format!(
                    "proposal {} already exists",
                    proposal.id
                )));
            }
            state.proposals.push(proposal.clone());
            Ok(proposal)
        })
        .await
    }

    async fn update_status(
        &self,
        id: &ProposalId,
        review: ProposalReview,
    ) -> DomainResult<ChangeProposal> {
        let id = id.clone();
        self.mutate(move |state| {
            let proposal = state
                .proposals
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("proposal {id}")))?;
            proposal.apply_review(&review);
            Ok(proposal.clone())
        })
        .await
    }

    async fn review_all_pending(
        &self,
        review: ProposalReview,
    ) -> DomainResult<Vec<ChangeProposal>> {
        self.mutate(move |state| {
            Ok(state
                .proposals
                .iter_mut()
                .filter(|p| p.status == ProposalStatus::Pending)
                .map(|p| {
                    p.apply_review(&review);
                    p.clone()
                })
                .collect())
        })
        .await
    }

    async fn delete(&self, id: &ProposalId) -> DomainResult<()> {
        let id = id.clone();
        self.mutate(move |state| {
            let before = state.proposals.len();
            state.proposals.retain(|p| p.id != id);
            if state.proposals.len() == before {
                return Err(DomainError::NotFound(format!("proposal {id}")));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<P: StatePersistence> ActivityLogRepository for StateBackedStore<P> {
    async fn append(&self, entry: ActivityLogEntry) -> DomainResult<()> {
        self.mutate(move |state| {
            push_bounded(&mut state.activity, entry);
            Ok(())
        })
        .await
    }

    async fn list(&self) -> DomainResult<Vec<ActivityLogEntry>> {
        Ok(self.read(|state| state.activity.clone()).await)
    }
}

#[async_trait]
impl<P: StatePersistence> SnapshotRepository for StateBackedStore<P> {
    async fn insert(&self, snapshot: Snapshot) -> DomainResult<()> {
        let _writer = self.write_gate.lock().await;
        let sequence = self.next_snapshot_sequence(&snapshot.id).await?;
        self.persistence.save_snapshot(&snapshot, sequence).await?;
        self.snapshots.write().await.push(snapshot);
        Ok(())
    }

    async fn find_by_id(&self, id: &VersionId) -> DomainResult<Option<Snapshot>> {
        Ok(self
            .snapshots
            .read()
            .await
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn list_metadata(&self) -> DomainResult<Vec<SnapshotMetadata>> {
        let snapshots = self.snapshots.read().await;
        let mut indexed: Vec<(usize, &Snapshot)> = snapshots.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));
        Ok(indexed.into_iter().map(|(_, s)| s.metadata()).collect())
    }
}

#[async_trait]
impl<P: StatePersistence> PublicationStore for StateBackedStore<P> {
    async fn commit_publish(&self, commit: PublishCommit) -> DomainResult<()> {
        let PublishCommit {
            snapshot,
            roster,
            consumed,
            activity,
        } = commit;

        let _writer = self.write_gate.lock().await;
        let sequence = self.next_snapshot_sequence(&snapshot.id).await?;

        let consumed: HashSet<ProposalId> = consumed.into_iter().collect();
        let mut next = self.state.read().await.clone();
        ensure_roster_unchanged(&next.employees, &snapshot.checksum)?;
        let still_approved = next
            .proposals
            .iter()
            .filter(|p| consumed.contains(&p.id) && p.is_approved())
            .count();
        if still_approved != consumed.len() {
            return Err(DomainError::Conflict(
                "approved proposals changed while the publish was being prepared; retry".into(),
            ));
        }
        next.employees = roster;
        next.proposals.retain(|p| !consumed.contains(&p.id));
        push_bounded(&mut next.activity, activity);

        self.persistence.save_snapshot(&snapshot, sequence).await?;
        if let Err(err) = self.persistence.save_state(&next).await {
            self.persistence.discard_snapshot(&snapshot.id).await;
            return Err(err);
        }

        // Lock order: state, then snapshots.
        let mut state = self.state.write().await;
        let mut snapshots = self.snapshots.write().await;
        *state = next;
        snapshots.push(snapshot);
        Ok(())
    }

    async fn commit_replacement(&self, commit: RosterReplacement) -> DomainResult<()> {
        let RosterReplacement {
            roster,
            base_checksum,
            activity,
        } = commit;
        self.mutate(move |state| {
            ensure_roster_unchanged(&state.employees, &base_checksum)?;
            state.employees = roster;
            push_bounded(&mut state.activity, activity);
            Ok(())
        })
        .await
    }
}
