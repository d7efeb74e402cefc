pub mod activity;
pub mod caller;
pub mod employee;
pub mod errors;
pub mod proposal;
pub mod publication;
pub mod snapshot;
