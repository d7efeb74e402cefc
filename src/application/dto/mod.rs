pub mod auth;
pub mod employees;
pub mod history;
pub mod proposals;
pub mod serde_time;

pub use auth::{AuthenticatedUser, CallerDto};
pub use employees::{DirectoryStatsDto, EmployeeDto, EmployeeInput, GroupCountDto};
pub use history::{
    ActivityEntryDto, ImportResultDto, PublishResultDto, RollbackResultDto, SnapshotDto,
    SnapshotSummaryDto,
};
pub use proposals::{ApproveAllResultDto, ProposalDto};
