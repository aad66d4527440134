//! Protobuf-compatible wire format.
//!
//! Equivalent message definitions:
//!
//! ```text
//! message AddressBook { repeated Person people = 1; }
//!
//! message Person {
//!   int32 id = 1;
//!   string name = 2;
//!   optional string email = 3;
//!   repeated PhoneNumber phones = 4;
//!   optional int64 birthday = 5;   // days counted from 0001-01-01 = 1
//!   optional Gender gender = 6;
//!   optional Role role = 7;        // written for version 2 records only
//!   optional uint32 version = 8;
//!
//!   message PhoneNumber {
//!     string number = 1;
//!     PhoneType type = 2;
//!   }
//! }
//! ```
//!
//! Fields this build does not know, including enum values outside the
//! known range, stay with the message they were read from and are written
//! back after its known fields.

use super::{build_decoded, CodecKind, RecordCodec};
use crate::collection::EmployeeCollection;
use crate::entity::{
    Employee, EmployeeBuilder, Gender, PhoneNumber, PhoneType, Role, SchemaVersion,
};
use crate::error::{CoreError, CoreResult};
use chrono::{Datelike, NaiveDate};
use recordb_codec::wire::{Field, UnknownFields, WireReader, WireWriter};
use tracing::debug;

const BOOK_PERSON: u32 = 1;

const PERSON_ID: u32 = 1;
const PERSON_NAME: u32 = 2;
const PERSON_EMAIL: u32 = 3;
const PERSON_PHONE: u32 = 4;
const PERSON_BIRTHDAY: u32 = 5;
const PERSON_GENDER: u32 = 6;
const PERSON_ROLE: u32 = 7;
const PERSON_VERSION: u32 = 8;

const PHONE_NUMBER: u32 = 1;
const PHONE_TYPE: u32 = 2;

/// The protobuf-compatible wire codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireCodec;

// Writes a known enum value and returns the captures minus any stale raw
// value for the same field. With no known value the captures are kept
// whole, raw value included.
fn write_enum(
    w: &mut WireWriter,
    unknown: &UnknownFields,
    field: u32,
    value: Option<u64>,
) -> UnknownFields {
    match value {
        Some(v) => {
            w.uint64(field, v);
            unknown.without(field)
        }
        None => unknown.clone(),
    }
}

fn write_phone(w: &mut WireWriter, phone: &PhoneNumber) {
    w.string(PHONE_NUMBER, &phone.number);
    let kept_raw = phone.kind == PhoneType::Unknown && phone.unknown_fields.contains(PHONE_TYPE);
    let kind = (!kept_raw).then(|| phone.kind.wire_number());
    let rest = write_enum(w, &phone.unknown_fields, PHONE_TYPE, kind);
    w.unknown(&rest);
}

fn write_person(w: &mut WireWriter, e: &Employee) {
    w.uint64(PERSON_ID, u64::from(e.id().get()));
    w.string(PERSON_NAME, e.name());
    if let Some(email) = e.email() {
        w.string(PERSON_EMAIL, email);
    }
    for phone in e.phones() {
        w.message(PERSON_PHONE, |p| write_phone(p, phone));
    }
    if let Some(birthday) = e.birthday() {
        w.int64(PERSON_BIRTHDAY, i64::from(birthday.num_days_from_ce()));
    }

    let unknown = write_enum(
        w,
        e.unknown_fields(),
        PERSON_GENDER,
        e.gender().map(Gender::wire_number),
    );
    let kept_raw_role = e.role() == Role::Unknown && unknown.contains(PERSON_ROLE);
    let role = (e.version().has_contact_fields() && !kept_raw_role).then(|| e.role().wire_number());
    let unknown = write_enum(w, &unknown, PERSON_ROLE, role);

    w.uint64(PERSON_VERSION, u64::from(e.version().tag()));
    w.unknown(&unknown);
}

fn read_phone(bytes: &[u8]) -> CoreResult<PhoneNumber> {
    let mut number = String::new();
    let mut kind = PhoneType::Unknown;
    let mut unknown = UnknownFields::new();

    let mut reader = WireReader::new(bytes);
    while let Some(field) = reader.next_field()? {
        match field.number {
            PHONE_NUMBER => number = field.expect_string("phone.number")?.to_string(),
            PHONE_TYPE => match PhoneType::from_wire_number(field.expect_varint("phone.type")?) {
                Some(k) => kind = k,
                None => {
                    kind = PhoneType::Unknown;
                    unknown.push(&field);
                }
            },
            _ => unknown.push(&field),
        }
    }

    let mut phone = PhoneNumber::new(number, kind);
    phone.unknown_fields = unknown;
    Ok(phone)
}

#[allow(clippy::cast_possible_wrap)]
fn read_birthday(field: &Field<'_>) -> CoreResult<NaiveDate> {
    let days = field.expect_varint("birthday")? as i64;
    i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| CoreError::corrupt(format!("birthday day number {days} is out of range")))
}

fn read_person(bytes: &[u8]) -> CoreResult<Employee> {
    let mut id = None;
    let mut name = None;
    let mut email = None;
    let mut phones = Vec::new();
    let mut birthday = None;
    let mut gender = None;
    let mut role = Role::Unknown;
    let mut version = SchemaVersion::CURRENT;
    let mut unknown = UnknownFields::new();

    let mut reader = WireReader::new(bytes);
    while let Some(field) = reader.next_field()? {
        match field.number {
            PERSON_ID => id = Some(field.expect_varint("id")?),
            PERSON_NAME => name = Some(field.expect_string("name")?.to_string()),
            PERSON_EMAIL => email = Some(field.expect_string("email")?.to_string()),
            PERSON_PHONE => phones.push(read_phone(field.expect_bytes("phone")?)?),
            PERSON_BIRTHDAY => birthday = Some(read_birthday(&field)?),
            PERSON_GENDER => {
                gender = Gender::from_wire_number(field.expect_varint("gender")?);
                if gender.is_none() {
                    unknown.push(&field);
                }
            }
            PERSON_ROLE => match Role::from_wire_number(field.expect_varint("role")?) {
                Some(r) => role = r,
                None => {
                    role = Role::Unknown;
                    unknown.push(&field);
                }
            },
            PERSON_VERSION => {
                version = SchemaVersion::from_tag(field.expect_varint("version")?)?;
            }
            _ => unknown.push(&field),
        }
    }

    let id = id.ok_or_else(|| CoreError::corrupt("person is missing id"))?;
    let id = i64::try_from(id)
        .map_err(|_| CoreError::corrupt(format!("person id {id} is out of range")))?;
    let name = name.ok_or_else(|| CoreError::corrupt("person is missing name"))?;

    let mut builder = EmployeeBuilder::new(id, name)
        .version(version)
        .role(role)
        .phones(phones)
        .unknown_fields(unknown);
    if let Some(email) = email {
        builder = builder.email(email);
    }
    if let Some(birthday) = birthday {
        builder = builder.birthday(birthday);
    }
    if let Some(gender) = gender {
        builder = builder.gender(gender);
    }

    build_decoded(builder)
}

impl RecordCodec for WireCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Wire
    }

    fn encode(&self, employees: &EmployeeCollection) -> CoreResult<Vec<u8>> {
        let mut w = WireWriter::new();
        for employee in employees {
            w.message(BOOK_PERSON, |p| write_person(p, employee));
        }
        w.unknown(employees.unknown_fields());
        let bytes = w.into_bytes();
        debug!("Encoded {} wire records into {} bytes", employees.len(), bytes.len());
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> CoreResult<EmployeeCollection> {
        let mut employees = EmployeeCollection::new();
        let mut unknown = UnknownFields::new();
        let mut reader = WireReader::new(bytes);
        while let Some(field) = reader.next_field()? {
            if field.number == BOOK_PERSON {
                employees.push(read_person(field.expect_bytes("person")?)?);
            } else {
                unknown.push(&field);
            }
        }
        employees.set_unknown_fields(unknown);
        debug!("Decoded {} wire records from {} bytes", employees.len(), bytes.len());
        Ok(employees)
    }
}
