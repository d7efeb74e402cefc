// tests/support/builders.rs
use staff_directory::application::dto::{AuthenticatedUser, EmployeeInput};
use staff_directory::domain::caller::Role;
use staff_directory::domain::employee::{Employee, EmployeeId, Location, PersonName};

pub const SUPER_TOKEN: &str = "super-secret-token";
pub const APPROVER_TOKEN: &str = "approver-secret-token";
pub const EDITOR_TOKEN: &str = "editor-secret-token";

pub fn super_admin() -> AuthenticatedUser {
    AuthenticatedUser::new("ada@example.com", "Ada Admin", "ada@example.com", Role::SuperAdmin)
}

pub fn approver() -> AuthenticatedUser {
    AuthenticatedUser::new("pat@example.com", "Pat Approver", "pat@example.com", Role::Approver)
}

pub fn editor() -> AuthenticatedUser {
    AuthenticatedUser::new("ed@example.com", "Ed Editor", "ed@example.com", Role::Editor)
}

pub fn employee(id: &str, first: &str, last: &str, location: &str) -> Employee {
    Employee::new(
        EmployeeId::new(id).unwrap(),
        PersonName::new(first).unwrap(),
        PersonName::new(last).unwrap(),
        Location::new(location).unwrap(),
    )
}

/// Alice (Tyler, Engineering), Bob (Athens, Sales), Cara (Tyler, no department).
pub fn sample_roster() -> Vec<Employee> {
    let mut alice = employee("e1", "Alice", "Smith", "Tyler");
    alice.department = Some("Engineering".into());
    alice.email = Some("alice@example.com".into());
    let mut bob = employee("e2", "Bob", "Jones", "Athens");
    bob.department = Some("Sales".into());
    let cara = employee("e3", "Cara", "Diaz", "Tyler");
    vec![alice, bob, cara]
}

pub fn input(id: Option<&str>, first: &str, last: &str, location: &str) -> EmployeeInput {
    EmployeeInput {
        id: id.map(str::to_string),
        first_name: first.into(),
        last_name: last.into(),
        location: location.into(),
        ..EmployeeInput::default()
    }
}
