// src/infrastructure/repositories/postgres/mod.rs
mod activity;
mod employees;
mod proposals;
mod publication;
mod rows;
mod snapshots;

use sqlx::PgPool;

/// Transaction-scoped advisory lock taken by publish and rollback commits.
const ROSTER_LOCK_KEY: i64 = 0x5354_4146_4644_4952;

/// PostgreSQL implementation of every directory repository.
#[derive(Clone)]
pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
