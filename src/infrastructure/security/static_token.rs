// src/infrastructure/security/static_token.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenAuthenticator,
};
use crate::config::ApiTokenConfig;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Authenticates bearer tokens against configured SHA-256 digests.
#[derive(Clone)]
pub struct StaticTokenAuthenticator {
    entries: Vec<ApiTokenConfig>,
}

impl StaticTokenAuthenticator {
    pub fn new(entries: Vec<ApiTokenConfig>) -> Self {
        Self { entries }
    }

    pub fn digest(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[async_trait]
impl TokenAuthenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApplicationError::unauthorized("empty bearer token"));
        }

        let presented = Self::digest(token);
        // Compare against every entry so timing does not reveal the match position.
        let mut matched = None;
        for entry in &self.entries {
            if constant_time_eq(&presented, &entry.sha256_hex) && matched.is_none() {
                matched = Some(entry);
            }
        }

        let entry = matched.ok_or_else(|| ApplicationError::unauthorized("invalid token"))?;
        Ok(AuthenticatedUser::new(
            entry.email.clone(),
            entry.name.clone(),
            entry.email.clone(),
            entry.role,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::caller::Role;

    fn authenticator() -> StaticTokenAuthenticator {
        StaticTokenAuthenticator::new(vec![ApiTokenConfig {
            name: "Ada Admin".into(),
            email: "ada@example.com".into(),
            role: Role::SuperAdmin,
            sha256_hex: StaticTokenAuthenticator::digest("s3cret"),
        }])
    }

    #[test]
    fn digest_is_lowercase_hex() {
        assert_eq!(
            StaticTokenAuthenticator::digest("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[tokio::test]
    async fn known_token_resolves_caller() {
        let user = authenticator().authenticate("s3cret").await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::SuperAdmin);
        assert!(user.has_capability("directory", "publish"));
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let err = authenticator().authenticate("guess").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
        let err = authenticator().authenticate("  ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
