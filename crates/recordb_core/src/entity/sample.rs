//! Sample employees.
//!
//! Pure factory functions; every call returns fresh values.

use super::attributes::{Gender, Role};
use super::employee::Employee;
use crate::collection::EmployeeCollection;
use chrono::NaiveDate;

fn sample(id: i64, birthday: (i32, u32, u32), gender: Gender, role: Role) -> Employee {
    let (y, m, d) = birthday;
    let mut builder = Employee::builder(id, format!("Employee {id}"))
        .gender(gender)
        .role(role);
    if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
        builder = builder.birthday(date);
    }
    builder.build().expect("sample employee is valid")
}

/// Employee 1: male architect born 1980-01-01.
#[must_use]
pub fn employee_one() -> Employee {
    sample(1, (1980, 1, 1), Gender::Male, Role::Architect)
}

/// Employee 2: female consultant born 1980-01-02.
#[must_use]
pub fn employee_two() -> Employee {
    sample(2, (1980, 1, 2), Gender::Female, Role::Consultant)
}

/// Both sample employees, in ID order.
#[must_use]
pub fn employees() -> EmployeeCollection {
    [employee_one(), employee_two()].into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_fresh_and_stable() {
        assert!(employee_one().is_identical(&employee_one()));
        assert_eq!(employee_two().name(), "Employee 2");
        assert_eq!(
            employee_one().birthday(),
            NaiveDate::from_ymd_opt(1980, 1, 1)
        );
    }

    #[test]
    fn collection_order() {
        let all = employees();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get(0).map(Employee::role), Some(Role::Architect));
        assert_eq!(all.get(1).map(Employee::gender), Some(Some(Gender::Female)));
    }
}
