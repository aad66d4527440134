//! Native envelope framing.
//!
//! The native format stores each record together with the schema version
//! it was written under, so a reader can pick the matching body shape and
//! upgrade it.
//!
//! ## Layout
//!
//! ```text
//! magic "RDBN" | envelope version u16 | record count u32 |
//!   ( record version u16 | body length u32 | body bytes )*
//! ```
//!
//! All integers are little-endian. Bodies are CBOR produced by
//! [`to_cbor`]. An input of zero bytes is an empty envelope.

use crate::error::{CodecError, CodecResult};
use bytes::{Buf, BufMut};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Magic bytes identifying a native record file.
pub const NATIVE_MAGIC: [u8; 4] = *b"RDBN";

/// Current envelope format version.
pub const ENVELOPE_VERSION: u16 = 1;

const HEADER_LEN: usize = NATIVE_MAGIC.len() + 2 + 4;
const RECORD_HEADER_LEN: usize = 2 + 4;

/// One framed record: its schema version tag and opaque body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Schema version the body was written under.
    pub version: u16,
    /// Encoded body.
    pub body: Vec<u8>,
}

impl RawRecord {
    /// Creates a framed record.
    pub fn new(version: u16, body: Vec<u8>) -> Self {
        Self { version, body }
    }
}

/// Frames `records` into a native envelope.
///
/// # Errors
///
/// Returns an error if there are more records, or a body is larger, than
/// the 4-byte length fields can express.
pub fn write_envelope(records: &[RawRecord]) -> CodecResult<Vec<u8>> {
    let count = u32::try_from(records.len())
        .map_err(|_| CodecError::encoding_failed("too many records for one envelope"))?;

    let body_total: usize = records.iter().map(|r| RECORD_HEADER_LEN + r.body.len()).sum();
    let mut buf = Vec::with_capacity(HEADER_LEN + body_total);
    buf.put_slice(&NATIVE_MAGIC);
    buf.put_u16_le(ENVELOPE_VERSION);
    buf.put_u32_le(count);

    for record in records {
        let len = u32::try_from(record.body.len())
            .map_err(|_| CodecError::encoding_failed("record body exceeds 4 GiB"))?;
        buf.put_u16_le(record.version);
        buf.put_u32_le(len);
        buf.put_slice(&record.body);
    }

    Ok(buf)
}

/// Splits a native envelope into its records.
///
/// Record version tags are returned as found; interpreting them is up to
/// the caller.
///
/// # Errors
///
/// - [`CodecError::Corrupt`] on bad magic, truncation or trailing bytes
/// - [`CodecError::UnsupportedVersion`] if the envelope version is newer
///   than [`ENVELOPE_VERSION`]
pub fn read_envelope(bytes: &[u8]) -> CodecResult<Vec<RawRecord>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut buf = bytes;
    let magic = take(&mut buf, NATIVE_MAGIC.len(), "magic")?;
    if magic != NATIVE_MAGIC {
        return Err(CodecError::corrupt("not a native record file (bad magic)"));
    }

    ensure(buf, 2, "envelope version")?;
    let version = buf.get_u16_le();
    if version == 0 || version > ENVELOPE_VERSION {
        return Err(CodecError::unsupported_version(
            "envelope",
            u64::from(version),
            u64::from(ENVELOPE_VERSION),
        ));
    }

    ensure(buf, 4, "record count")?;
    let count = buf.get_u32_le() as usize;
    // A record needs at least its header, so the count is bounded by the input.
    let mut records = Vec::with_capacity(count.min(buf.remaining() / RECORD_HEADER_LEN));

    for index in 0..count {
        ensure(buf, RECORD_HEADER_LEN, "record header")?;
        let version = buf.get_u16_le();
        let len = buf.get_u32_le() as usize;
        let body = take(&mut buf, len, "record body")
            .map_err(|_| CodecError::corrupt(format!("record {index} body is truncated")))?;
        records.push(RawRecord::new(version, body.to_vec()));
    }

    if buf.has_remaining() {
        return Err(CodecError::corrupt(format!(
            "{} trailing bytes after the last record",
            buf.remaining()
        )));
    }

    Ok(records)
}

/// Serializes a value into a CBOR body.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_cbor<T: Serialize>(value: &T) -> CodecResult<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf)
        .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
    Ok(buf)
}

/// Deserializes a CBOR body.
///
/// # Errors
///
/// Returns [`CodecError::Corrupt`] if the body is not valid CBOR for `T`.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::corrupt(format!("invalid record body: {e}")))
}

fn ensure(buf: &[u8], len: usize, context: &str) -> CodecResult<()> {
    if buf.len() < len {
        return Err(CodecError::truncated(context));
    }
    Ok(())
}

fn take<'a>(buf: &mut &'a [u8], len: usize, context: &str) -> CodecResult<&'a [u8]> {
    ensure(*buf, len, context)?;
    let (head, tail) = buf.split_at(len);
    *buf = tail;
    Ok(head)
}
