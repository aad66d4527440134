//! The employee entity.

mod attributes;
mod builder;
mod employee;
mod id;
pub mod sample;
mod version;

pub use attributes::{Gender, PhoneNumber, PhoneType, Role};
pub use builder::EmployeeBuilder;
pub use employee::{Employee, EmployeeKey};
pub use id::EmployeeId;
pub use version::SchemaVersion;
