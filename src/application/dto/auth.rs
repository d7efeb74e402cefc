use crate::domain::caller::{Capability, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// Caller resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}

impl AuthenticatedUser {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            capabilities: role.default_capabilities(),
        }
    }

    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }

    /// Name recorded as author/approver, falling back to the email.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallerDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    /// `resource:action` pairs, sorted.
    pub capabilities: Vec<String>,
    pub can_publish: bool,
}

impl CallerDto {
    pub fn from_caller(caller: &AuthenticatedUser, can_publish: bool) -> Self {
        let mut capabilities: Vec<String> =
            caller.capabilities.iter().map(ToString::to_string).collect();
        capabilities.sort();
        Self {
            id: caller.id.clone(),
            name: caller.name.clone(),
            email: caller.email.clone(),
            role: caller.role.as_str().to_string(),
            capabilities,
            can_publish,
        }
    }
}
