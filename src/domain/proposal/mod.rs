pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{ChangeProposal, ProposalReview};
pub use repository::ProposalRepository;
pub use value_objects::{ChangeKind, ProposalId, ProposalStatus};
