pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::Employee;
pub use repository::EmployeeRepository;
pub use value_objects::{EmployeeId, Location, PersonName};
