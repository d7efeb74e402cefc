// src/application/ports/util.rs
use chrono::{DateTime, Utc};

/// Source of short random tokens used as the unique suffix of generated ids.
pub trait IdGenerator: Send + Sync {
    fn next_token(&self) -> String;

    /// `{prefix}-{unix millis}-{token}`, sortable by creation time.
    fn prefixed_id(&self, prefix: &str, at: DateTime<Utc>) -> String {
        format!("{prefix}-{}-{}", at.timestamp_millis(), self.next_token())
    }
}
