// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use staff_directory::application::ports::{time::Clock, util::IdGenerator};
use staff_directory::domain::errors::{DomainError, DomainResult};
use staff_directory::domain::snapshot::{Snapshot, VersionId};
use staff_directory::infrastructure::repositories::{DirectoryState, StatePersistence};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
};

pub static BASE_TIME: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());

/// Advances one second per reading so successive versions sort by time.
#[derive(Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        *BASE_TIME + Duration::seconds(tick)
    }
}

#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_token(&self) -> String {
        format!("t{:04}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// In-process persistence whose state writes can be made to fail.
#[derive(Default)]
pub struct FlakyPersistence {
    pub fail_state_writes: AtomicBool,
    pub saved_snapshots: Mutex<Vec<String>>,
    pub discarded: Mutex<Vec<String>>,
}

#[async_trait]
impl StatePersistence for FlakyPersistence {
    async fn load(&self) -> DomainResult<(DirectoryState, Vec<Snapshot>)> {
        Ok((DirectoryState::default(), Vec::new()))
    }

    async fn save_state(&self, _state: &DirectoryState) -> DomainResult<()> {
        if self.fail_state_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("disk full".into()));
        }
        Ok(())
    }

    async fn save_snapshot(&self, snapshot: &Snapshot, _sequence: u64) -> DomainResult<()> {
        self.saved_snapshots
            .lock()
            .unwrap()
            .push(snapshot.id.to_string());
        Ok(())
    }

    async fn discard_snapshot(&self, id: &VersionId) {
        self.discarded.lock().unwrap().push(id.to_string());
    }
}

/// Handle given to the store while the test keeps its own reference.
#[derive(Clone, Default)]
pub struct SharedFlaky(pub Arc<FlakyPersistence>);

#[async_trait]
impl StatePersistence for SharedFlaky {
    async fn load(&self) -> DomainResult<(DirectoryState, Vec<Snapshot>)> {
        self.0.load().await
    }

    async fn save_state(&self, state: &DirectoryState) -> DomainResult<()> {
        self.0.save_state(state).await
    }

    async fn save_snapshot(&self, snapshot: &Snapshot, sequence: u64) -> DomainResult<()> {
        self.0.save_snapshot(snapshot, sequence).await
    }

    async fn discard_snapshot(&self, id: &VersionId) {
        self.0.discard_snapshot(id).await
    }
}
