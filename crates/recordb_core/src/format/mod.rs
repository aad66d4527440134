//! Entity codecs.
//!
//! Three interchangeable on-disk formats for an [`EmployeeCollection`]:
//!
//! | kind                     | layout                                      |
//! |--------------------------|---------------------------------------------|
//! | [`CodecKind::Native`]    | versioned envelope, one CBOR body per record |
//! | [`CodecKind::SchemaText`]| JSON document validated against a schema    |
//! | [`CodecKind::Wire`]      | protobuf-compatible, unknown fields kept    |
//!
//! Every decoder builds employees through [`EmployeeBuilder`], so decoded
//! values satisfy the builder's invariants. A value the builder rejects is
//! reported as [`CoreError::CorruptPayload`].

mod native;
mod text;
mod wire;

pub use native::{upgrade, BodyV1, BodyV2, NativeCodec, PhoneBody};
pub use text::{document_schema, SchemaTextCodec, DOCUMENT_SCHEMA, DOCUMENT_VERSION};
pub use wire::WireCodec;

use crate::collection::EmployeeCollection;
use crate::entity::{Employee, EmployeeBuilder};
use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Encodes and decodes a whole employee collection.
pub trait RecordCodec: fmt::Debug {
    /// Which format this codec implements.
    fn kind(&self) -> CodecKind;

    /// Encodes the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if a value cannot be represented.
    fn encode(&self, employees: &EmployeeCollection) -> CoreResult<Vec<u8>>;

    /// Decodes a collection. Zero bytes decode to an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptPayload`] if the bytes do not match the
    /// format and [`CoreError::UnsupportedVersion`] if they carry a version
    /// tag this build does not know.
    fn decode(&self, bytes: &[u8]) -> CoreResult<EmployeeCollection>;
}

/// Selects a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecKind {
    /// Versioned binary with schema evolution.
    Native,
    /// Schema-validated JSON.
    SchemaText,
    /// Protobuf-compatible binary.
    #[default]
    Wire,
}

impl CodecKind {
    /// Every codec kind.
    pub const ALL: [Self; 3] = [Self::Native, Self::SchemaText, Self::Wire];

    /// Returns a codec of this kind.
    #[must_use]
    pub fn codec(self) -> Box<dyn RecordCodec> {
        match self {
            Self::Native => Box::new(NativeCodec),
            Self::SchemaText => Box::new(SchemaTextCodec),
            Self::Wire => Box::new(WireCodec),
        }
    }

    /// Returns the short name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::SchemaText => "text",
            Self::Wire => "wire",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodecKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "unknown format \"{s}\", expected native, text or wire"
                ))
            })
    }
}

/// Builds a decoded employee, reporting builder rejections as corruption.
fn build_decoded(builder: EmployeeBuilder) -> CoreResult<Employee> {
    builder.build().map_err(|err| match err {
        CoreError::Validation { message } => CoreError::corrupt(message),
        other => other,
    })
}
