// src/application/commands/publication/mod.rs
mod import;
mod publish;
mod rollback;
mod service;

pub use import::ImportRosterCommand;
pub use publish::PublishCommand;
pub use rollback::RollbackCommand;
pub use service::PublicationService;
