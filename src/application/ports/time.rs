// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of proposal, review, snapshot and activity timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
