// src/infrastructure/repositories/memory.rs
use super::state::{DirectoryState, StateBackedStore, StatePersistence};
use crate::domain::employee::Employee;
use crate::domain::errors::DomainResult;
use crate::domain::snapshot::{Snapshot, VersionId};
use async_trait::async_trait;

/// Persistence that keeps nothing; state lives only in the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct Volatile;

#[async_trait]
impl StatePersistence for Volatile {
    async fn load(&self) -> DomainResult<(DirectoryState, Vec<Snapshot>)> {
        Ok((DirectoryState::default(), Vec::new()))
    }

    async fn save_state(&self, _state: &DirectoryState) -> DomainResult<()> {
        Ok(())
    }

    async fn save_snapshot(&self, _snapshot: &Snapshot, _sequence: u64) -> DomainResult<()> {
        Ok(())
    }

    async fn discard_snapshot(&self, _id: &VersionId) {}
}

pub type InMemoryStore = StateBackedStore<Volatile>;

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_roster(Vec::new())
    }

    pub fn with_roster(employees: Vec<Employee>) -> Self {
        Self::from_parts(
            Volatile,
            DirectoryState {
                employees,
                ..DirectoryState::default()
            },
            Vec::new(),
        )
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::{ACTIVITY_LOG_CAPACITY, ActivityKind, ActivityLogEntry, ActivityLogRepository};
    use crate::domain::employee::{EmployeeId, EmployeeRepository, Location, PersonName};
    use crate::domain::errors::DomainError;
    use crate::domain::proposal::{
        ChangeKind, ChangeProposal, ProposalId, ProposalRepository, ProposalReview, ProposalStatus,
    };
    use crate::domain::snapshot::{SnapshotKind, SnapshotRepository};
    use chrono::{Duration, TimeZone, Utc};

    fn employee(id: &str) -> Employee {
        Employee::new(
            EmployeeId::new(id).unwrap(),
            PersonName::new("Alice").unwrap(),
            PersonName::new("Smith").unwrap(),
            Location::new("Tyler").unwrap(),
        )
    }

    fn proposal(id: &str, status: ProposalStatus) -> ChangeProposal {
        ChangeProposal {
            id: ProposalId::new(id).unwrap(),
            kind: ChangeKind::Delete,
            employee_id: Some(EmployeeId::new("e1").unwrap()),
            before: None,
            after: None,
            proposed_by: "editor".into(),
            proposed_at: Utc::now(),
            status,
            approved_by: None,
            approved_at: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn inserts_append_to_roster_order() {
        let store = InMemoryStore::with_roster(vec![employee("e1"), employee("e2")]);
        EmployeeRepository::insert(&store, employee("e0")).await.unwrap();
        let err = EmployeeRepository::insert(&store, employee("e1")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let found = EmployeeRepository::find_by_id(&store, &EmployeeId::new("e0").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
        let ids: Vec<_> = EmployeeRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(ids, vec!["e1", "e2", "e0"]);
    }

    #[tokio::test]
    async fn proposals_filter_by_status_in_insertion_order() {
        let store = InMemoryStore::new();
        for (id, status) in [
            ("c1", ProposalStatus::Pending),
            ("c2", ProposalStatus::Approved),
            ("c3", ProposalStatus::Pending),
        ] {
            ProposalRepository::insert(&store, proposal(id, status)).await.unwrap();
        }

        let pending = ProposalRepository::list(&store, Some(ProposalStatus::Pending))
            .await
            .unwrap();
        let ids: Vec<_> = pending.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);

        let approved = store
            .review_all_pending(ProposalReview::new(ProposalStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.len(), 2);
        assert!(
            ProposalRepository::list(&store, Some(ProposalStatus::Pending))
                .await
                .unwrap()
                .is_empty()
        );

        let missing = ProposalId::new("nope").unwrap();
        assert!(matches!(
            store
                .update_status(&missing, ProposalReview::new(ProposalStatus::Rejected))
                .await
                .unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            ProposalRepository::delete(&store, &missing).await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn activity_log_is_bounded() {
        let store = InMemoryStore::new();
        for n in 0..(ACTIVITY_LOG_CAPACITY + 5) {
            store
                .append(ActivityLogEntry::new(
                    format!("activity-{n}"),
                    ActivityKind::Change,
                    "",
                    "Admin",
                    Utc::now(),
                ))
                .await
                .unwrap();
        }
        let log = ActivityLogRepository::list(&store).await.unwrap();
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log[0].id, format!("activity-{}", ACTIVITY_LOG_CAPACITY + 4));
    }

    #[tokio::test]
    async fn snapshot_metadata_is_newest_first_with_stable_ties() {
        let store = InMemoryStore::new();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        for (id, at) in [("v-a", t0), ("v-b", t0 + Duration::minutes(5)), ("v-c", t0 + Duration::minutes(5))] {
            let snapshot = Snapshot::capture(
                VersionId::new(id).unwrap(),
                SnapshotKind::Publish,
                "Admin",
                at,
                &[employee("e1")],
                vec![],
            )
            .unwrap();
            SnapshotRepository::insert(&store, snapshot).await.unwrap();
        }

        let ids: Vec<_> = store
            .list_metadata()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id.to_string())
            .collect();
        assert_eq!(ids, vec!["v-c", "v-b", "v-a"]);

        let duplicate = Snapshot::capture(
            VersionId::new("v-a").unwrap(),
            SnapshotKind::Publish,
            "Admin",
            t0,
            &[],
            vec![],
        )
        .unwrap();
        assert!(matches!(
            SnapshotRepository::insert(&store, duplicate).await.unwrap_err(),
            DomainError::Conflict(_)
        ));
    }
}
