// src/application/commands/proposals/mod.rs
mod approve_all;
mod create;
mod delete;
mod review;
mod service;

pub use create::{CreateProposalCommand, CreateProposalCommandBuilder};
pub use delete::DeleteProposalCommand;
pub use review::ReviewProposalCommand;
pub use service::ProposalCommandService;
