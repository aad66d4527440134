//! The employee entity and its identity contract.

use super::attributes::{Gender, PhoneNumber, Role};
use super::builder::EmployeeBuilder;
use super::id::EmployeeId;
use super::version::SchemaVersion;
use chrono::NaiveDate;
use recordb_codec::wire::UnknownFields;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// The identity key of an employee: ID and name.
///
/// Ordering is by ID, then name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeKey<'a> {
    /// Employee ID.
    pub id: EmployeeId,
    /// Employee name.
    pub name: &'a str,
}

/// An immutable employee record.
///
/// Created only through [`EmployeeBuilder`], so every value satisfies the
/// builder's invariants.
///
/// # Identity
///
/// Equality, hashing and ordering all go through [`Employee::key`]:
/// two employees with the same ID and name are equal whatever their
/// other attributes. Use [`Employee::is_identical`] to compare every
/// attribute.
#[derive(Debug, Clone)]
pub struct Employee {
    pub(super) id: EmployeeId,
    pub(super) name: String,
    pub(super) birthday: Option<NaiveDate>,
    pub(super) gender: Option<Gender>,
    pub(super) role: Role,
    pub(super) version: SchemaVersion,
    pub(super) email: Option<String>,
    pub(super) phones: Vec<PhoneNumber>,
    pub(super) unknown_fields: UnknownFields,
}

impl Employee {
    /// Starts building an employee.
    pub fn builder(id: i64, name: impl Into<String>) -> EmployeeBuilder {
        EmployeeBuilder::new(id, name)
    }

    /// Returns a fresh builder seeded with this employee's values.
    ///
    /// The builder owns copies; building from it never affects `self`.
    #[must_use]
    pub fn to_builder(&self) -> EmployeeBuilder {
        EmployeeBuilder::from_employee(self)
    }

    /// Returns the identity key.
    #[must_use]
    pub fn key(&self) -> EmployeeKey<'_> {
        EmployeeKey {
            id: self.id,
            name: &self.name,
        }
    }

    /// Returns the ID.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the birthday, if recorded.
    #[must_use]
    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }

    /// Returns the gender, if recorded.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the schema version this record was created or written under.
    #[must_use]
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Returns the email address, if present. `Some("")` is a present but
    /// empty address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone numbers in insertion order.
    #[must_use]
    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    /// Returns wire fields a newer writer added that this build does not
    /// know. Empty unless the record was decoded from the wire format.
    #[must_use]
    pub fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    /// Compares every attribute, not just the identity key.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.birthday == other.birthday
            && self.gender == other.gender
            && self.role == other.role
            && self.version == other.version
            && self.email == other.email
            && self.phones == other.phones
            && self.unknown_fields == other.unknown_fields
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Employee {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Employee {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
