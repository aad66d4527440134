//! Staged construction of employees.

use super::attributes::{Gender, PhoneNumber, Role};
use super::employee::Employee;
use super::id::EmployeeId;
use super::version::SchemaVersion;
use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use recordb_codec::wire::UnknownFields;

/// Builds an [`Employee`].
///
/// Setters only record values; all validation happens in
/// [`EmployeeBuilder::build`], which consumes the builder. A built
/// employee shares nothing with any builder, so no partially built or
/// later-mutated employee is ever observable.
///
/// # Example
///
/// ```
/// use recordb_core::{Employee, Gender, PhoneNumber, PhoneType, Role};
///
/// let employee = Employee::builder(1, "Employee 1")
///     .gender(Gender::Male)
///     .role(Role::Architect)
///     .phone(PhoneNumber::new("555-0100", PhoneType::Work))
///     .build()
///     .unwrap();
/// assert_eq!(employee.phones().len(), 1);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct EmployeeBuilder {
    id: i64,
    name: String,
    birthday: Option<NaiveDate>,
    gender: Option<Gender>,
    role: Role,
    version: SchemaVersion,
    email: Option<String>,
    phones: Vec<PhoneNumber>,
    unknown_fields: UnknownFields,
}

impl EmployeeBuilder {
    /// Starts a builder with the two identity fields.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            birthday: None,
            gender: None,
            role: Role::Unknown,
            version: SchemaVersion::CURRENT,
            email: None,
            phones: Vec::new(),
            unknown_fields: UnknownFields::new(),
        }
    }

    pub(super) fn from_employee(employee: &Employee) -> Self {
        Self {
            id: i64::from(employee.id.get()),
            name: employee.name.clone(),
            birthday: employee.birthday,
            gender: employee.gender,
            role: employee.role,
            version: employee.version,
            email: employee.email.clone(),
            phones: employee.phones.clone(),
            unknown_fields: employee.unknown_fields.clone(),
        }
    }

    /// Sets the birthday.
    pub fn birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Sets the gender.
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Sets the role. Requires schema version 2.
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the schema version tag. Defaults to [`SchemaVersion::CURRENT`].
    pub fn version(mut self, version: SchemaVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the email address. Requires schema version 2.
    ///
    /// An empty string is recorded as a present, empty address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a phone number. Requires schema version 2.
    pub fn phone(mut self, phone: PhoneNumber) -> Self {
        self.phones.push(phone);
        self
    }

    /// Adds several phone numbers.
    pub fn phones(mut self, phones: impl IntoIterator<Item = PhoneNumber>) -> Self {
        self.phones.extend(phones);
        self
    }

    pub(crate) fn unknown_fields(mut self, fields: UnknownFields) -> Self {
        self.unknown_fields = fields;
        self
    }

    /// Validates and produces the employee.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if:
    /// - the ID is outside `1..=`[`EmployeeId::MAX`]
    /// - the name is empty or only whitespace
    /// - a phone number is empty
    /// - a version 1 record carries a role, email or phone number
    pub fn build(self) -> CoreResult<Employee> {
        let id = EmployeeId::new(self.id).ok_or_else(|| {
            CoreError::validation(format!(
                "id must be between 1 and {}, got {}",
                EmployeeId::MAX,
                self.id
            ))
        })?;

        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name must not be empty"));
        }

        if let Some(index) = self.phones.iter().position(|p| p.number.trim().is_empty()) {
            return Err(CoreError::validation(format!(
                "phone number {index} must not be empty"
            )));
        }

        if !self.version.has_contact_fields() {
            let extra = [
                (self.role != Role::Unknown, "role"),
                (self.email.is_some(), "email"),
                (!self.phones.is_empty(), "phone numbers"),
            ];
            if let Some((_, field)) = extra.iter().find(|(present, _)| *present) {
                return Err(CoreError::validation(format!(
                    "{field} requires schema version 2, record is {}",
                    self.version
                )));
            }
        }

        Ok(Employee {
            id,
            name: self.name,
            birthday: self.birthday,
            gender: self.gender,
            role: self.role,
            version: self.version,
            email: self.email,
            phones: self.phones,
            unknown_fields: self.unknown_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::PhoneType;

    fn validation_message(result: CoreResult<Employee>) -> String {
        match result {
            Err(CoreError::Validation { message }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn minimal_employee() {
        let e = EmployeeBuilder::new(1, "Ada").build().unwrap();
        assert_eq!(e.id().get(), 1);
        assert_eq!(e.name(), "Ada");
        assert_eq!(e.role(), Role::Unknown);
        assert_eq!(e.version(), SchemaVersion::CURRENT);
        assert!(e.email().is_none());
        assert!(e.phones().is_empty());
        assert!(e.unknown_fields().is_empty());
    }

    #[test]
    fn all_attributes() {
        let birthday = NaiveDate::from_ymd_opt(1980, 1, 2).unwrap();
        let e = EmployeeBuilder::new(2, "Employee 2")
            .birthday(birthday)
            .gender(Gender::Female)
            .role(Role::Consultant)
            .email("e2@example.com")
            .phone(PhoneNumber::new("555-1", PhoneType::Home))
            .phones([PhoneNumber::new("555-2", PhoneType::Mobile)])
            .build()
            .unwrap();

        assert_eq!(e.birthday(), Some(birthday));
        assert_eq!(e.gender(), Some(Gender::Female));
        assert_eq!(e.role(), Role::Consultant);
        assert_eq!(e.email(), Some("e2@example.com"));
        assert_eq!(e.phones()[1].kind, PhoneType::Mobile);
    }

    #[test]
    fn empty_email_is_present() {
        let e = EmployeeBuilder::new(1, "Ada").email("").build().unwrap();
        assert_eq!(e.email(), Some(""));
    }

    #[test]
    fn non_positive_id_rejected() {
        let msg = validation_message(EmployeeBuilder::new(0, "Ada").build());
        assert!(msg.starts_with("id must be between 1 and"));
        validation_message(EmployeeBuilder::new(-1, "Ada").build());
    }

    #[test]
    fn blank_name_rejected() {
        assert_eq!(
            validation_message(EmployeeBuilder::new(1, "   ").build()),
            "name must not be empty"
        );
    }

    #[test]
    fn empty_phone_number_rejected() {
        let msg = validation_message(
            EmployeeBuilder::new(1, "Ada")
                .phone(PhoneNumber::new("", PhoneType::Home))
                .build(),
        );
        assert_eq!(msg, "phone number 0 must not be empty");
    }

    #[test]
    fn version_one_rejects_contact_fields() {
        let msg = validation_message(
            EmployeeBuilder::new(1, "Ada")
                .version(SchemaVersion::V1)
                .role(Role::Architect)
                .build(),
        );
        assert_eq!(msg, "role requires schema version 2, record is v1");

        let msg = validation_message(
            EmployeeBuilder::new(1, "Ada")
                .version(SchemaVersion::V1)
                .email("a@b")
                .build(),
        );
        assert!(msg.starts_with("email requires"));
    }

    #[test]
    fn version_one_with_base_fields() {
        let e = EmployeeBuilder::new(1, "Ada")
            .version(SchemaVersion::V1)
            .gender(Gender::Female)
            .build()
            .unwrap();
        assert_eq!(e.version(), SchemaVersion::V1);
    }

    #[test]
    fn rebuilding_does_not_touch_built_employee() {
        let builder = EmployeeBuilder::new(1, "Ada").role(Role::Developer);
        let first = builder.clone().build().unwrap();
        let second = builder.role(Role::Manager).build().unwrap();

        assert_eq!(first.role(), Role::Developer);
        assert_eq!(second.role(), Role::Manager);
    }

    #[test]
    fn to_builder_copies_everything() {
        let original = EmployeeBuilder::new(7, "Grace")
            .gender(Gender::Female)
            .role(Role::Architect)
            .email("grace@example.com")
            .build()
            .unwrap();

        let changed = original.to_builder().role(Role::Manager).build().unwrap();
        let copy = original.to_builder().build().unwrap();

        assert!(copy.is_identical(&original));
        assert_eq!(original.role(), Role::Architect);
        assert_eq!(changed.role(), Role::Manager);
        assert_eq!(changed, original);
    }
}
