// src/domain/caller/value_objects.rs
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// Privilege tiers of directory administrators, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Approver,
    #[default]
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Approver => "approver",
            Role::Editor => "editor",
        }
    }

    pub fn default_capabilities(&self) -> HashSet<Capability> {
        use Capability as Cap;
        match self {
            Role::SuperAdmin => HashSet::from([
                Cap::new("proposals", "create"),
                Cap::new("proposals", "read"),
                Cap::new("proposals", "review"),
                Cap::new("proposals", "delete"),
                Cap::new("history", "read"),
                Cap::new("directory", "publish"),
            ]),
            Role::Approver => HashSet::from([
                Cap::new("proposals", "create"),
                Cap::new("proposals", "read"),
                Cap::new("proposals", "review"),
                Cap::new("proposals", "delete"),
                Cap::new("history", "read"),
            ]),
            Role::Editor => HashSet::from([
                Cap::new("proposals", "create"),
                Cap::new("proposals", "read"),
                Cap::new("history", "read"),
            ]),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::SuperAdmin),
            "approver" => Ok(Role::Approver),
            "editor" => Ok(Role::Editor),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}
