pub mod entity;
pub mod repository;

pub use entity::{ACTIVITY_LOG_CAPACITY, ActivityKind, ActivityLogEntry, push_bounded};
pub use repository::ActivityLogRepository;
