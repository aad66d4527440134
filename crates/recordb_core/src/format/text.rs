//! Schema-validated JSON format.
//!
//! A file is one document holding every employee:
//!
//! ```json
//! {
//!   "employees": [
//!     { "id": 1, "name": "Employee 1", "role": "ARCHITECT", "version": 2 }
//!   ],
//!   "schema": "recordb.employees",
//!   "schemaVersion": 2
//! }
//! ```
//!
//! Documents are checked against the Draft 7 JSON Schema returned by
//! [`document_schema`] before any value is mapped, so a field of the wrong
//! type is reported with its JSON pointer.

use super::{build_decoded, CodecKind, RecordCodec};
use crate::collection::EmployeeCollection;
use crate::entity::{
    Employee, EmployeeBuilder, EmployeeId, Gender, PhoneNumber, PhoneType, Role, SchemaVersion,
};
use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use jsonschema::{Draft, JSONSchema};
use recordb_codec::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;
use tracing::debug;

/// Value of the document's `schema` member.
pub const DOCUMENT_SCHEMA: &str = "recordb.employees";

/// Value of the document's `schemaVersion` member written by this build.
pub const DOCUMENT_VERSION: u16 = SchemaVersion::CURRENT.tag();

const DATE_FORMAT: &str = "%Y-%m-%d";

fn version_schema() -> Value {
    json!({ "type": "integer", "minimum": 1, "maximum": DOCUMENT_VERSION })
}

fn phone_schema() -> Value {
    json!({
        "type": "object",
        "required": ["number"],
        "additionalProperties": false,
        "properties": {
            "number": { "type": "string" },
            "type": { "enum": PhoneType::NAMES },
        },
    })
}

fn employee_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "name", "version"],
        "additionalProperties": false,
        "properties": {
            "id": { "type": "integer", "minimum": 1, "maximum": EmployeeId::MAX },
            "name": { "type": "string" },
            "birthday": {
                "type": "string",
                "format": "date",
                "pattern": "^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
            },
            "gender": { "enum": Gender::NAMES },
            "role": { "enum": Role::NAMES },
            "email": { "type": "string" },
            "phones": { "type": "array", "items": phone_schema() },
            "version": version_schema(),
        },
    })
}

/// Returns the Draft 7 JSON Schema every document is validated against.
#[must_use]
pub fn document_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": DOCUMENT_SCHEMA,
        "type": "object",
        "required": ["schema", "schemaVersion"],
        "additionalProperties": false,
        "properties": {
            "schema": { "enum": [DOCUMENT_SCHEMA] },
            "schemaVersion": version_schema(),
            "employees": { "type": "array", "items": employee_schema() },
        },
    })
}

fn compiled_schema() -> CoreResult<&'static JSONSchema> {
    static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            let schema = document_schema();
            JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(&schema)
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| CoreError::corrupt(format!("document schema does not compile: {e}")))
}

/// Validates `document`, reporting the first violation with its instance
/// path.
fn validate(document: &Value) -> CoreResult<()> {
    let schema = compiled_schema()?;
    if let Err(mut errors) = schema.validate(document) {
        if let Some(error) = errors.next() {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            return Err(CoreError::corrupt(format!("schema violation at {path}: {error}")));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextDocument {
    schema: String,
    schema_version: u16,
    #[serde(default)]
    employees: Option<Vec<TextEmployee>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextEmployee {
    id: u32,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phones: Option<Vec<TextPhone>>,
    version: u16,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPhone {
    number: String,
    #[serde(rename = "type", default)]
    kind: Option<PhoneType>,
}

impl TextEmployee {
    fn from_employee(e: &Employee) -> Self {
        let contact = e.version().has_contact_fields();
        Self {
            id: e.id().get(),
            name: e.name().to_string(),
            birthday: e.birthday().map(|d| d.format(DATE_FORMAT).to_string()),
            gender: e.gender(),
            role: contact.then_some(e.role()),
            email: e.email().map(str::to_string),
            phones: (!e.phones().is_empty()).then(|| {
                e.phones()
                    .iter()
                    .map(|p| TextPhone {
                        number: p.number.clone(),
                        kind: Some(p.kind),
                    })
                    .collect()
            }),
            version: e.version().tag(),
        }
    }

    fn into_employee(self) -> CoreResult<Employee> {
        let version = SchemaVersion::from_tag(u64::from(self.version))?;
        let mut builder = EmployeeBuilder::new(i64::from(self.id), self.name).version(version);

        if let Some(birthday) = self.birthday {
            let date = NaiveDate::parse_from_str(&birthday, DATE_FORMAT)
                .map_err(|e| CoreError::corrupt(format!("birthday \"{birthday}\": {e}")))?;
            builder = builder.birthday(date);
        }
        if let Some(gender) = self.gender {
            builder = builder.gender(gender);
        }
        if let Some(role) = self.role {
            builder = builder.role(role);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        builder = builder.phones(
            self.phones
                .unwrap_or_default()
                .into_iter()
                .map(|p| PhoneNumber::new(p.number, p.kind.unwrap_or_default())),
        );

        build_decoded(builder)
    }
}

/// Rejects version tags newer than this build before schema validation,
/// so they surface as unsupported rather than corrupt.
fn check_versions(document: &Value) -> CoreResult<()> {
    let max = u64::from(DOCUMENT_VERSION);

    if let Some(found) = document.get("schemaVersion").and_then(Value::as_u64) {
        if found > max {
            return Err(CodecError::unsupported_version("document", found, max).into());
        }
    }

    let records = document
        .get("employees")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    for record in records {
        if let Some(found) = record.get("version").and_then(Value::as_u64) {
            if found > max {
                return Err(CodecError::unsupported_version("record", found, max).into());
            }
        }
    }

    Ok(())
}

/// The schema-validated JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTextCodec;

impl RecordCodec for SchemaTextCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::SchemaText
    }

    fn encode(&self, employees: &EmployeeCollection) -> CoreResult<Vec<u8>> {
        let document = TextDocument {
            schema: DOCUMENT_SCHEMA.to_string(),
            schema_version: DOCUMENT_VERSION,
            employees: Some(employees.iter().map(TextEmployee::from_employee).collect()),
        };

        // Going through Value sorts the keys.
        let value = serde_json::to_value(&document).map_err(|e| CoreError::encoding(e.to_string()))?;
        let mut bytes =
            serde_json::to_vec_pretty(&value).map_err(|e| CoreError::encoding(e.to_string()))?;
        bytes.push(b'\n');

        debug!("Encoded {} text records into {} bytes", employees.len(), bytes.len());
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> CoreResult<EmployeeCollection> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(EmployeeCollection::new());
        }

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::corrupt(format!("invalid JSON: {e}")))?;
        check_versions(&value)?;
        validate(&value)?;

        let document: TextDocument = serde_json::from_value(value)
            .map_err(|e| CoreError::corrupt(format!("invalid document: {e}")))?;
        let employees = document
            .employees
            .unwrap_or_default()
            .into_iter()
            .map(TextEmployee::into_employee)
            .collect::<CoreResult<EmployeeCollection>>()?;

        debug!("Decoded {} text records from {} bytes", employees.len(), bytes.len());
        Ok(employees)
    }
}
