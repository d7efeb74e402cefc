use crate::domain::employee::entity::Employee;
use crate::domain::employee::value_objects::EmployeeId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Current-truth roster. Ordering of `list` is the roster order and is
/// preserved by every implementation.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Employee>>;
    async fn find_by_id(&self, id: &EmployeeId) -> DomainResult<Option<Employee>>;
    /// Appends one record. Fails with `Conflict` when the identifier is
    /// already taken. Roster changes otherwise go through `PublicationStore`.
    async fn insert(&self, employee: Employee) -> DomainResult<Employee>;
}
