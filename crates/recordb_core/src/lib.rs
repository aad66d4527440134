//! # recordb core
//!
//! Versioned employee records and the file store that keeps them.
//!
//! This crate provides:
//! - The [`Employee`] entity, built through [`EmployeeBuilder`], with
//!   equality and hashing over its identity key only
//! - Schema versions and the upgrade of older records
//! - Three interchangeable codecs (see [`format`])
//! - The [`RecordStore`] read-merge-append-write workflow
//!
//! ## Example
//!
//! ```no_run
//! use recordb_core::{Employee, Gender, RecordStore, Role, StoreConfig};
//!
//! let employee = Employee::builder(1, "Employee 1")
//!     .gender(Gender::Male)
//!     .role(Role::Architect)
//!     .build()?;
//!
//! let store = RecordStore::new(StoreConfig::default());
//! store.append("employees.bin", employee)?;
//!
//! for e in &store.list_all("employees.bin")?.records {
//!     println!("{} {}", e.id(), e.name());
//! }
//! # Ok::<(), recordb_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
pub mod entity;
mod error;
pub mod format;
mod store;

pub use collection::EmployeeCollection;
pub use config::{ReadFailurePolicy, StoreConfig};
pub use entity::{
    sample, Employee, EmployeeBuilder, EmployeeId, EmployeeKey, Gender, PhoneNumber, PhoneType,
    Role, SchemaVersion,
};
pub use error::{CoreError, CoreResult};
pub use format::{CodecKind, RecordCodec};
pub use store::{Listing, RecordStore};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
