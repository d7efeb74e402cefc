// src/domain/activity/entity.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of entries retained by the activity log.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Change,
    Publish,
    Rollback,
    Import,
    Comment,
    Feature,
    #[serde(other)]
    Other,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Change => "change",
            ActivityKind::Publish => "publish",
            ActivityKind::Rollback => "rollback",
            ActivityKind::Import => "import",
            ActivityKind::Comment => "comment",
            ActivityKind::Feature => "feature",
            ActivityKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "change" => ActivityKind::Change,
            "publish" => ActivityKind::Publish,
            "rollback" => ActivityKind::Rollback,
            "import" => ActivityKind::Import,
            "comment" => ActivityKind::Comment,
            "feature" => ActivityKind::Feature,
            _ => ActivityKind::Other,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub action: String,
    pub details: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

impl ActivityLogEntry {
    pub fn new(
        id: impl Into<String>,
        kind: ActivityKind,
        details: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            action: kind.as_str().to_string(),
            details: details.into(),
            author: author.into(),
            timestamp,
            kind,
        }
    }
}

/// Inserts `entry` at the head of a newest-first log and evicts the oldest
/// entries beyond [`ACTIVITY_LOG_CAPACITY`].
pub fn push_bounded(log: &mut Vec<ActivityLogEntry>, entry: ActivityLogEntry) {
    log.insert(0, entry);
    log.truncate(ACTIVITY_LOG_CAPACITY);
}
