// src/application/ports/policy.rs
use crate::application::dto::AuthenticatedUser;

/// Decides whether a caller may publish or roll back the roster.
pub trait PublishPolicy: Send + Sync {
    fn can_publish(&self, caller: &AuthenticatedUser) -> bool;
}

/// Grants publishing to callers holding `directory:publish`.
#[derive(Debug, Default, Clone)]
pub struct CapabilityPublishPolicy;

impl PublishPolicy for CapabilityPublishPolicy {
    fn can_publish(&self, caller: &AuthenticatedUser) -> bool {
        caller.has_capability("directory", "publish")
    }
}
