pub mod repository;
pub mod roster;

pub use repository::{PublicationStore, PublishCommit, RosterReplacement, ensure_roster_unchanged};
pub use roster::apply_proposals;
