//! Native versioned binary format.
//!
//! Each record is framed with the schema version it was written under
//! and its body is the CBOR encoding of that version's shape. Readers
//! decode older shapes and [`upgrade`] them, so records written by an
//! older build stay readable after fields are added.

use super::{build_decoded, CodecKind, RecordCodec};
use crate::collection::EmployeeCollection;
use crate::entity::{Employee, EmployeeBuilder, Gender, PhoneNumber, PhoneType, Role, SchemaVersion};
use crate::error::CoreResult;
use chrono::NaiveDate;
use recordb_codec::envelope::{self, RawRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Record body written under schema version 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyV1 {
    /// Employee ID.
    pub id: u32,
    /// Employee name.
    pub name: String,
    /// Birthday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// A phone number inside a [`BodyV2`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneBody {
    /// The number.
    pub number: String,
    /// Its kind.
    #[serde(default)]
    pub kind: PhoneType,
}

/// Record body written under schema version 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyV2 {
    /// Employee ID.
    pub id: u32,
    /// Employee name.
    pub name: String,
    /// Birthday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Role.
    #[serde(default)]
    pub role: Role,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone numbers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<PhoneBody>,
}

/// Maps a version 1 body onto the version 2 shape.
///
/// Fields version 1 lacks take their defaults: role
/// [`Role::Unknown`], no email and no phone numbers.
#[must_use]
pub fn upgrade(v1: BodyV1) -> BodyV2 {
    BodyV2 {
        id: v1.id,
        name: v1.name,
        birthday: v1.birthday,
        gender: v1.gender,
        role: Role::Unknown,
        email: None,
        phones: Vec::new(),
    }
}

impl BodyV1 {
    fn from_employee(e: &Employee) -> Self {
        Self {
            id: e.id().get(),
            name: e.name().to_string(),
            birthday: e.birthday(),
            gender: e.gender(),
        }
    }
}

impl BodyV2 {
    fn from_employee(e: &Employee) -> Self {
        Self {
            id: e.id().get(),
            name: e.name().to_string(),
            birthday: e.birthday(),
            gender: e.gender(),
            role: e.role(),
            email: e.email().map(str::to_string),
            phones: e
                .phones()
                .iter()
                .map(|p| PhoneBody {
                    number: p.number.clone(),
                    kind: p.kind,
                })
                .collect(),
        }
    }

    fn into_builder(self, version: SchemaVersion) -> EmployeeBuilder {
        let mut builder = EmployeeBuilder::new(i64::from(self.id), self.name)
            .version(version)
            .role(self.role)
            .phones(
                self.phones
                    .into_iter()
                    .map(|p| PhoneNumber::new(p.number, p.kind)),
            );
        if let Some(birthday) = self.birthday {
            builder = builder.birthday(birthday);
        }
        if let Some(gender) = self.gender {
            builder = builder.gender(gender);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        builder
    }
}

/// The native versioned binary codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl NativeCodec {
    fn encode_record(employee: &Employee) -> CoreResult<RawRecord> {
        let version = employee.version();
        let body = match version {
            SchemaVersion::V1 => envelope::to_cbor(&BodyV1::from_employee(employee))?,
            SchemaVersion::V2 => envelope::to_cbor(&BodyV2::from_employee(employee))?,
        };
        Ok(RawRecord::new(version.tag(), body))
    }

    fn decode_record(record: &RawRecord) -> CoreResult<Employee> {
        let version = SchemaVersion::from_tag(u64::from(record.version))?;
        let body = match version {
            SchemaVersion::V1 => upgrade(envelope::from_cbor::<BodyV1>(&record.body)?),
            SchemaVersion::V2 => envelope::from_cbor::<BodyV2>(&record.body)?,
        };
        build_decoded(body.into_builder(version))
    }
}

impl RecordCodec for NativeCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Native
    }

    fn encode(&self, employees: &EmployeeCollection) -> CoreResult<Vec<u8>> {
        let records = employees
            .iter()
            .map(Self::encode_record)
            .collect::<CoreResult<Vec<_>>>()?;
        let bytes = envelope::write_envelope(&records)?;
        debug!("Encoded {} native records into {} bytes", records.len(), bytes.len());
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> CoreResult<EmployeeCollection> {
        let records = envelope::read_envelope(bytes)?;
        let employees = records
            .iter()
            .map(Self::decode_record)
            .collect::<CoreResult<EmployeeCollection>>()?;
        debug!("Decoded {} native records from {} bytes", employees.len(), bytes.len());
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sample;
    use crate::error::CoreError;
    use recordb_codec::envelope::{read_envelope, write_envelope};

    fn v1_body() -> BodyV1 {
        BodyV1 {
            id: 9,
            name: "Old Timer".to_string(),
            birthday: NaiveDate::from_ymd_opt(1970, 5, 6),
            gender: Some(Gender::Female),
        }
    }

    fn v1_file(body: &BodyV1) -> Vec<u8> {
        let record = RawRecord::new(1, envelope::to_cbor(body).unwrap());
        write_envelope(&[record]).unwrap()
    }

    #[test]
    fn upgrade_table() {
        let cases = [
            v1_body(),
            BodyV1 {
                id: 1,
                name: "Bare".to_string(),
                birthday: None,
                gender: None,
            },
        ];
        for v1 in cases {
            let v2 = upgrade(v1.clone());
            assert_eq!(v2.id, v1.id);
            assert_eq!(v2.name, v1.name);
            assert_eq!(v2.birthday, v1.birthday);
            assert_eq!(v2.gender, v1.gender);
            assert_eq!(v2.role, Role::Unknown);
            assert_eq!(v2.email, None);
            assert!(v2.phones.is_empty());
        }
    }

    #[test]
    fn v1_record_decodes_with_defaults() {
        let decoded = NativeCodec.decode(&v1_file(&v1_body())).unwrap();
        let e = &decoded[0];

        assert_eq!(e.version(), SchemaVersion::V1);
        assert_eq!(e.name(), "Old Timer");
        assert_eq!(e.gender(), Some(Gender::Female));
        assert_eq!(e.role(), Role::Unknown);
        assert_eq!(e.email(), None);
        assert!(e.phones().is_empty());
    }

    #[test]
    fn records_keep_their_version_tag() {
        let old = Employee::builder(1, "Old")
            .version(SchemaVersion::V1)
            .build()
            .unwrap();
        let employees: EmployeeCollection = vec![old, sample::employee_two()].into();

        let bytes = NativeCodec.encode(&employees).unwrap();
        let tags: Vec<u16> = read_envelope(&bytes)
            .unwrap()
            .iter()
            .map(|r| r.version)
            .collect();
        assert_eq!(tags, vec![1, 2]);

        let decoded = NativeCodec.decode(&bytes).unwrap();
        assert!(decoded.is_identical(&employees));
    }

    #[test]
    fn v2_with_contact_fields_roundtrips() {
        let e = Employee::builder(5, "Five")
            .email("")
            .phone(PhoneNumber::new("555", PhoneType::Work))
            .build()
            .unwrap();
        let employees: EmployeeCollection = vec![e].into();

        let decoded = NativeCodec
            .decode(&NativeCodec.encode(&employees).unwrap())
            .unwrap();
        assert!(decoded.is_identical(&employees));
        assert_eq!(decoded[0].email(), Some(""));
    }

    #[test]
    fn encoding_is_deterministic() {
        let employees = sample::employees();
        assert_eq!(
            NativeCodec.encode(&employees).unwrap(),
            NativeCodec.encode(&employees).unwrap()
        );
    }

    #[test]
    fn newer_record_version_is_unsupported() {
        let record = RawRecord::new(3, envelope::to_cbor(&v1_body()).unwrap());
        let bytes = write_envelope(&[record]).unwrap();

        assert!(matches!(
            NativeCodec.decode(&bytes),
            Err(CoreError::UnsupportedVersion {
                what: "record",
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn garbage_body_is_corrupt() {
        let bytes = write_envelope(&[RawRecord::new(2, vec![0xff, 0x00])]).unwrap();
        assert!(matches!(
            NativeCodec.decode(&bytes),
            Err(CoreError::CorruptPayload { .. })
        ));
    }

    #[test]
    fn zero_id_is_corrupt() {
        let mut body = v1_body();
        body.id = 0;
        assert!(matches!(
            NativeCodec.decode(&v1_file(&body)),
            Err(CoreError::CorruptPayload { .. })
        ));
    }

    #[test]
    fn truncated_file_is_corrupt() {
        let bytes = NativeCodec.encode(&sample::employees()).unwrap();
        assert!(matches!(
            NativeCodec.decode(&bytes[..bytes.len() - 1]),
            Err(CoreError::CorruptPayload { .. })
        ));
    }
}
