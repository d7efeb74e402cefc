use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::employee::{Employee, EmployeeId, Location, PersonName};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.into(),
            first_name: employee.first_name.into(),
            last_name: employee.last_name.into(),
            email: employee.email,
            extension: employee.extension,
            phone_number: employee.phone_number,
            location: employee.location.into(),
            team: employee.team,
            department: employee.department,
            title: employee.title,
            photo_url: employee.photo_url,
        }
    }
}

/// Employee payload carried by add/edit proposals and roster imports. `id`
/// may be omitted for adds, in which case one is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "EmployeeInputWire")]
pub struct EmployeeInput {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub extension: Option<String>,
    pub phone_number: Option<String>,
    pub location: String,
    pub team: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub photo_url: Option<String>,
}

/// Request shape of [`EmployeeInput`]; legacy spellings are accepted and the
/// current key wins when both are sent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeInputWire {
    #[serde(default)]
    id: Option<String>,
    first_name: String,
    last_name: String,
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
    location: String,
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

impl From<EmployeeInputWire> for EmployeeInput {
    fn from(wire: EmployeeInputWire) -> Self {
        Self {
            id: wire.id,
            first_name: wire.first_name,
            last_name: wire.last_name,
            email: wire.email,
            extension: wire.extension.or(wire.extension_number),
            phone_number: wire.phone_number.or(wire.did),
            location: wire.location,
            team: wire.team,
            department: wire.department,
            title: wire.title.or(wire.job_title),
            photo_url: wire.photo_url.or(wire.avatar_url),
        }
    }
}

impl EmployeeInput {
    /// Builds the domain record, using `fallback_id` when the input has none.
    pub fn into_employee(self, fallback_id: impl FnOnce() -> String) -> ApplicationResult<Employee> {
        let id = match self.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => fallback_id(),
        };
        let mut employee = Employee::new(
            EmployeeId::new(id)?,
            PersonName::new(self.first_name)?,
            PersonName::new(self.last_name)?,
            Location::new(self.location)?,
        );
        employee.email = non_blank(self.email);
        employee.extension = non_blank(self.extension);
        employee.phone_number = non_blank(self.phone_number);
        employee.team = non_blank(self.team);
        employee.department = non_blank(self.department);
        employee.title = non_blank(self.title);
        employee.photo_url = non_blank(self.photo_url);
        Ok(employee)
    }

    pub fn require_id(&self) -> ApplicationResult<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApplicationError::validation("employee id is required"))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupCountDto {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStatsDto {
    pub total_employees: usize,
    /// Sorted by name.
    pub by_location: Vec<GroupCountDto>,
    /// Employees without a department are counted under `Unassigned`.
    pub by_department: Vec<GroupCountDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optionals_are_dropped_and_id_generated() {
        let input = EmployeeInput {
            first_name: "Bea".into(),
            last_name: "Diaz".into(),
            location: "Athens".into(),
            email: Some("   ".into()),
            title: Some(" Optician ".into()),
            ..Default::default()
        };
        let employee = input.into_employee(|| "emp-1".to_string()).unwrap();
        assert_eq!(employee.id.as_str(), "emp-1");
        assert_eq!(employee.email, None);
        assert_eq!(employee.title.as_deref(), Some("Optician"));
    }

    #[test]
    fn blank_names_fail_validation() {
        let input = EmployeeInput {
            id: Some("e1".into()),
            first_name: " ".into(),
            last_name: "Diaz".into(),
            location: "Athens".into(),
            ..Default::default()
        };
        assert!(input.into_employee(String::new).is_err());
    }

    #[test]
    fn legacy_and_current_keys_together() {
        let input: EmployeeInput = serde_json::from_str(
            r#"{"firstName":"Bo","lastName":"Diaz","location":"Athens",
                "extensionNumber":"204","extension":"205","avatarUrl":"/img/bo.png"}"#,
        )
        .unwrap();
        assert_eq!(input.extension.as_deref(), Some("205"));
        assert_eq!(input.photo_url.as_deref(), Some("/img/bo.png"));
    }
}
