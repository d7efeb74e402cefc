// src/infrastructure/repositories/mod.rs
mod error;
mod json_file;
mod memory;
mod postgres;
mod state;

pub use error::map_sqlx;
pub use json_file::{JsonFileStore, JsonFiles};
pub use memory::{InMemoryStore, Volatile};
pub use postgres::PostgresDirectoryStore;
pub use state::{DirectoryState, StateBackedStore, StatePersistence};
