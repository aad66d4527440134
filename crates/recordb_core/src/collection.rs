//! Ordered employee collections.
//!
//! An [`EmployeeCollection`] is the unit exchanged between the codecs and
//! the record store: one persisted file holds exactly one collection.

use crate::entity::Employee;
use recordb_codec::wire::UnknownFields;
use std::ops::Index;

/// An ordered sequence of employees.
///
/// Insertion order is preserved and no uniqueness is enforced, so several
/// employees with the same identity key may coexist.
#[derive(Debug, Clone, Default)]
pub struct EmployeeCollection {
    employees: Vec<Employee>,
    unknown_fields: UnknownFields,
}

impl EmployeeCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with room for `capacity` employees.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            employees: Vec::with_capacity(capacity),
            unknown_fields: UnknownFields::new(),
        }
    }

    /// Appends an employee at the end.
    pub fn push(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Returns the number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the collection holds no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    /// Returns the employee at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Employee> {
        self.employees.get(index)
    }

    /// Returns the employees as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    /// Consumes the collection, returning the employees.
    #[must_use]
    pub fn into_vec(self) -> Vec<Employee> {
        self.employees
    }

    /// Top-level wire fields this build does not know. They travel with the
    /// collection so that appending to a file keeps them.
    #[must_use]
    pub fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    pub(crate) fn set_unknown_fields(&mut self, fields: UnknownFields) {
        self.unknown_fields = fields;
    }

    /// Compares every attribute of every employee, in order, and the
    /// top-level unknown fields.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.unknown_fields == other.unknown_fields
            && self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.is_identical(b))
    }
}

impl Index<usize> for EmployeeCollection {
    type Output = Employee;

    fn index(&self, index: usize) -> &Employee {
        &self.employees[index]
    }
}

impl From<Vec<Employee>> for EmployeeCollection {
    fn from(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            unknown_fields: UnknownFields::new(),
        }
    }
}

impl FromIterator<Employee> for EmployeeCollection {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<Employee> for EmployeeCollection {
    fn extend<I: IntoIterator<Item = Employee>>(&mut self, iter: I) {
        self.employees.extend(iter);
    }
}

impl IntoIterator for EmployeeCollection {
    type Item = Employee;
    type IntoIter = std::vec::IntoIter<Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.into_iter()
    }
}

impl<'a> IntoIterator for &'a EmployeeCollection {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}
