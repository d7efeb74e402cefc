// src/domain/employee/entity.rs
use crate::domain::employee::value_objects::{EmployeeId, Location, PersonName};
use serde::{Deserialize, Serialize};

/// One row of the roster. Stored and exchanged with camelCase keys so that
/// directory exports from older tooling load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEmployee")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Accepted on-disk shape. Older tooling wrote `extensionNumber`, `did`,
/// `jobTitle` and `avatarUrl`, and some records carry both spellings; the
/// current key wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEmployee {
    id: EmployeeId,
    first_name: PersonName,
    last_name: PersonName,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    extension_number: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    did: Option<String>,
    location: Location,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl From<StoredEmployee> for Employee {
    fn from(stored: StoredEmployee) -> Self {
        Self {
            id: stored.id,
            first_name: stored.first_name,
            last_name: stored.last_name,
            email: stored.email,
            extension: stored.extension.or(stored.extension_number),
            phone_number: stored.phone_number.or(stored.did),
            location: stored.location,
            team: stored.team,
            department: stored.department,
            title: stored.title.or(stored.job_title),
            photo_url: stored.photo_url.or(stored.avatar_url),
        }
    }
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        first_name: PersonName,
        last_name: PersonName,
        location: Location,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email: None,
            extension: None,
            phone_number: None,
            location,
            team: None,
            department: None,
            title: None,
            photo_url: None,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match over name, email, department and location.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |value: &str| value.to_lowercase().contains(&needle);
        contains(self.first_name.as_str())
            || contains(self.last_name.as_str())
            || contains(self.location.as_str())
            || self.email.as_deref().is_some_and(contains)
            || self.department.as_deref().is_some_and(contains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Employee {
        let mut employee = Employee::new(
            EmployeeId::new("e1").unwrap(),
            PersonName::new("Alice").unwrap(),
            PersonName::new("Smith").unwrap(),
            Location::new("Tyler").unwrap(),
        );
        employee.department = Some("Optometry".into());
        employee
    }

    #[test]
    fn query_matches_across_fields() {
        let employee = alice();
        assert!(employee.matches_query("alice"));
        assert!(employee.matches_query("TYL"));
        assert!(employee.matches_query("optom"));
        assert!(employee.matches_query(""));
        assert!(!employee.matches_query("athens"));
    }

    #[test]
    fn legacy_field_aliases_deserialize() {
        let raw = r#"{
            "id": "e9",
            "firstName": "Bo",
            "lastName": "Diaz",
            "location": "Athens",
            "extensionNumber": "204",
            "did": "903-555-0100",
            "jobTitle": "Technician",
            "avatarUrl": "/img/bo.png"
        }"#;
        let employee: Employee = serde_json::from_str(raw).unwrap();
        assert_eq!(employee.extension.as_deref(), Some("204"));
        assert_eq!(employee.phone_number.as_deref(), Some("903-555-0100"));
        assert_eq!(employee.title.as_deref(), Some("Technician"));
        assert_eq!(employee.photo_url.as_deref(), Some("/img/bo.png"));
        assert_eq!(employee.display_name(), "Bo Diaz");
    }

    #[test]
    fn current_key_wins_over_legacy_spelling() {
        let raw = r#"{
            "id": "e9",
            "firstName": "Bo",
            "lastName": "Diaz",
            "location": "Athens",
            "extensionNumber": "204",
            "extension": "205",
            "did": "903-555-0100",
            "jobTitle": "Technician",
            "title": "Lead Technician"
        }"#;
        let employee: Employee = serde_json::from_str(raw).unwrap();
        assert_eq!(employee.extension.as_deref(), Some("205"));
        assert_eq!(employee.phone_number.as_deref(), Some("903-555-0100"));
        assert_eq!(employee.title.as_deref(), Some("Lead Technician"));

        let written = serde_json::to_value(&employee).unwrap();
        assert_eq!(written["extension"], "205");
        assert!(written.get("extensionNumber").is_none());
    }

    #[test]
    fn missing_required_name_is_rejected() {
        let raw = r#"{ "id": "e9", "firstName": "", "lastName": "Diaz", "location": "Athens" }"#;
        assert!(serde_json::from_str::<Employee>(raw).is_err());
    }
}
