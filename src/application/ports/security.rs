// src/application/ports/security.rs
use crate::application::{ApplicationResult, dto::AuthenticatedUser};
use async_trait::async_trait;

#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Resolve a bearer token to the caller it was issued to. Unknown tokens
    /// fail with `Unauthorized`.
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;
}
