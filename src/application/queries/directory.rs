// src/application/queries/directory.rs
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    application::{
        dto::{DirectoryStatsDto, EmployeeDto, GroupCountDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::employee::{Employee, EmployeeId, EmployeeRepository},
};

const UNASSIGNED: &str = "Unassigned";

/// Filters for the public roster listing. All filters combine with AND;
/// `location` and `department` match case-insensitively and exactly.
#[derive(Debug, Default, Clone)]
pub struct ListEmployeesQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
}

impl ListEmployeesQuery {
    fn matches(&self, employee: &Employee) -> bool {
        let same = |filter: &Option<String>, value: Option<&str>| match filter.as_deref() {
            Some(wanted) if !wanted.trim().is_empty() => {
                value.is_some_and(|value| value.eq_ignore_ascii_case(wanted.trim()))
            }
            _ => true,
        };

        self.q
            .as_deref()
            .is_none_or(|query| employee.matches_query(query))
            && same(&self.location, Some(employee.location.as_str()))
            && same(&self.department, employee.department.as_deref())
    }
}

pub struct DirectoryQueryService {
    employee_repo: Arc<dyn EmployeeRepository>,
}

impl DirectoryQueryService {
    pub fn new(employee_repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { employee_repo }
    }

    /// Roster order is preserved.
    pub async fn list_employees(
        &self,
        query: ListEmployeesQuery,
    ) -> ApplicationResult<Vec<EmployeeDto>> {
        let roster = self.employee_repo.list().await?;
        Ok(roster
            .into_iter()
            .filter(|employee| query.matches(employee))
            .map(Into::into)
            .collect())
    }

    pub async fn get_employee(&self, id: &str) -> ApplicationResult<EmployeeDto> {
        let id = EmployeeId::new(id)?;
        self.employee_repo
            .find_by_id(&id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("employee {id} not found")))
    }

    pub async fn stats(&self) -> ApplicationResult<DirectoryStatsDto> {
        let roster = self.employee_repo.list().await?;
        let mut by_location: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_department: BTreeMap<String, usize> = BTreeMap::new();
        for employee in &roster {
            *by_location
                .entry(employee.location.as_str().to_string())
                .or_default() += 1;
            let department = employee
                .department
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(UNASSIGNED);
            *by_department.entry(department.to_string()).or_default() += 1;
        }

        let groups = |map: BTreeMap<String, usize>| {
            map.into_iter()
                .map(|(name, count)| GroupCountDto { name, count })
                .collect()
        };
        Ok(DirectoryStatsDto {
            total_employees: roster.len(),
            by_location: groups(by_location),
            by_department: groups(by_department),
        })
    }
}
