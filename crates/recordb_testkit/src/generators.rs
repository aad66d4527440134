//! Property-based test generators using proptest.
//!
//! Every strategy produces values the builder accepts, so tests can
//! focus on the codecs and the store.

use chrono::NaiveDate;
use proptest::prelude::*;
use recordb_core::{
    Employee, EmployeeCollection, EmployeeId, Gender, PhoneNumber, PhoneType, Role, SchemaVersion,
};

/// Strategy for valid employee IDs.
pub fn id_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        8 => 1i64..10_000,
        1 => Just(i64::from(EmployeeId::MAX)),
        1 => 1i64..=i64::from(EmployeeId::MAX),
    ]
}

/// Strategy for non-blank names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 .'-]{0,23}").expect("Invalid regex")
}

/// Strategy for birthdays between 1900 and 2099.
pub fn birthday_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("day 1..=28 always exists"))
}

/// Strategy for genders.
pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop::sample::select(vec![Gender::Male, Gender::Female])
}

/// Strategy for roles, including [`Role::Unknown`].
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![
        Role::Unknown,
        Role::Architect,
        Role::Consultant,
        Role::Developer,
        Role::Manager,
    ])
}

/// Strategy for email addresses. Includes the empty address, which must
/// stay distinct from an absent one.
pub fn email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => prop::string::string_regex("[a-z]{1,8}@example\\.com").expect("Invalid regex"),
    ]
}

/// Strategy for phone numbers.
pub fn phone_strategy() -> impl Strategy<Value = PhoneNumber> {
    (
        prop::string::string_regex("[0-9]{3}-[0-9]{4}").expect("Invalid regex"),
        prop::sample::select(vec![
            PhoneType::Mobile,
            PhoneType::Home,
            PhoneType::Work,
            PhoneType::Unknown,
        ]),
    )
        .prop_map(|(number, kind)| PhoneNumber::new(number, kind))
}

/// Strategy for employees tagged with schema version 1.
pub fn employee_v1_strategy() -> impl Strategy<Value = Employee> {
    (
        id_strategy(),
        name_strategy(),
        prop::option::of(birthday_strategy()),
        prop::option::of(gender_strategy()),
    )
        .prop_map(|(id, name, birthday, gender)| {
            let mut builder = Employee::builder(id, name).version(SchemaVersion::V1);
            if let Some(birthday) = birthday {
                builder = builder.birthday(birthday);
            }
            if let Some(gender) = gender {
                builder = builder.gender(gender);
            }
            builder.build().expect("generated employee is valid")
        })
}

/// Strategy for employees tagged with schema version 2.
pub fn employee_v2_strategy() -> impl Strategy<Value = Employee> {
    (
        id_strategy(),
        name_strategy(),
        prop::option::of(birthday_strategy()),
        prop::option::of(gender_strategy()),
        role_strategy(),
        prop::option::of(email_strategy()),
        prop::collection::vec(phone_strategy(), 0..3),
    )
        .prop_map(|(id, name, birthday, gender, role, email, phones)| {
            let mut builder = Employee::builder(id, name)
                .version(SchemaVersion::V2)
                .role(role)
                .phones(phones);
            if let Some(birthday) = birthday {
                builder = builder.birthday(birthday);
            }
            if let Some(gender) = gender {
                builder = builder.gender(gender);
            }
            if let Some(email) = email {
                builder = builder.email(email);
            }
            builder.build().expect("generated employee is valid")
        })
}

/// Strategy for employees of any known version.
pub fn employee_strategy() -> impl Strategy<Value = Employee> {
    prop_oneof![
        1 => employee_v1_strategy(),
        3 => employee_v2_strategy(),
    ]
}

/// Strategy for collections of up to `max_len - 1` employees.
pub fn collection_strategy(max_len: usize) -> impl Strategy<Value = EmployeeCollection> {
    prop::collection::vec(employee_strategy(), 0..max_len).prop_map(EmployeeCollection::from)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn names_are_never_blank(name in name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }

        #[test]
        fn v1_employees_carry_no_contact_fields(e in employee_v1_strategy()) {
            prop_assert_eq!(e.version(), SchemaVersion::V1);
            prop_assert_eq!(e.role(), Role::Unknown);
            prop_assert!(e.email().is_none());
            prop_assert!(e.phones().is_empty());
        }

        #[test]
        fn collections_respect_length(c in collection_strategy(5)) {
            prop_assert!(c.len() < 5);
        }
    }
}
