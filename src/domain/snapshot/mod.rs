pub mod entity;
pub mod repository;

pub use entity::{Snapshot, SnapshotKind, SnapshotMetadata, VersionId, roster_checksum};
pub use repository::SnapshotRepository;
