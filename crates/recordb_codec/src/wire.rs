//! Protobuf-compatible wire encoding.
//!
//! Messages are sequences of `(key, value)` fields where the key packs a
//! field number and a [`WireType`]. Length-delimited values carry a varint
//! length prefix, which is what lets a reader skip fields it does not
//! know. [`UnknownFields`] keeps such fields verbatim so they can be
//! written back unchanged.
//!
//! Groups (wire types 3 and 4) are deprecated and rejected.

use crate::error::{CodecError, CodecResult};
use bytes::{Buf, BufMut, BytesMut};

/// Largest field number protobuf allows.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const MAX_VARINT_LEN: usize = 10;

/// Wire type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// int32, int64, uint32, uint64, bool, enum.
    Varint = 0,
    /// fixed64, sfixed64, double.
    Fixed64 = 1,
    /// string, bytes, embedded messages, packed repeated fields.
    LengthDelimited = 2,
    /// fixed32, sfixed32, float.
    Fixed32 = 5,
}

impl WireType {
    /// Converts the low three key bits to a wire type.
    pub fn from_bits(bits: u8) -> CodecResult<Self> {
        match bits {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            3 | 4 => Err(CodecError::corrupt("group wire types are not supported")),
            other => Err(CodecError::corrupt(format!("invalid wire type {other}"))),
        }
    }
}

/// Builds a protobuf message.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a varint field.
    pub fn uint64(&mut self, field: u32, value: u64) {
        self.key(field, WireType::Varint);
        self.varint(value);
    }

    /// Writes a signed varint field using two's complement, as protobuf
    /// `int64` does.
    #[allow(clippy::cast_sign_loss)]
    pub fn int64(&mut self, field: u32, value: i64) {
        self.uint64(field, value as u64);
    }

    /// Writes a length-delimited field.
    pub fn bytes(&mut self, field: u32, value: &[u8]) {
        self.key(field, WireType::LengthDelimited);
        self.varint(value.len() as u64);
        self.buf.put_slice(value);
    }

    /// Writes a string field.
    pub fn string(&mut self, field: u32, value: &str) {
        self.bytes(field, value.as_bytes());
    }

    /// Writes an embedded message built by `build`.
    pub fn message(&mut self, field: u32, build: impl FnOnce(&mut WireWriter)) {
        let mut nested = WireWriter::new();
        build(&mut nested);
        self.bytes(field, &nested.buf);
    }

    /// Appends previously captured fields verbatim.
    pub fn unknown(&mut self, fields: &UnknownFields) {
        self.buf.put_slice(fields.as_bytes());
    }

    /// Consumes the writer and returns the encoded message.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    fn key(&mut self, field: u32, wire_type: WireType) {
        debug_assert!(field > 0 && field <= MAX_FIELD_NUMBER);
        self.varint((u64::from(field) << 3) | wire_type as u64);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.put_u8((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.put_u8(value as u8);
    }
}

/// The value of a decoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A varint.
    Varint(u64),
    /// Eight little-endian bytes.
    Fixed64(u64),
    /// A length-delimited payload.
    Bytes(&'a [u8]),
    /// Four little-endian bytes.
    Fixed32(u32),
}

/// A decoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field number.
    pub number: u32,
    /// Decoded value.
    pub value: FieldValue<'a>,
    /// The whole field as it appeared on the wire, key included.
    pub raw: &'a [u8],
}

impl<'a> Field<'a> {
    /// Returns the varint value or a corrupt error naming `name`.
    pub fn expect_varint(&self, name: &str) -> CodecResult<u64> {
        match self.value {
            FieldValue::Varint(v) => Ok(v),
            _ => Err(self.mismatch(name, "varint")),
        }
    }

    /// Returns the length-delimited payload or a corrupt error naming `name`.
    pub fn expect_bytes(&self, name: &str) -> CodecResult<&'a [u8]> {
        match self.value {
            FieldValue::Bytes(b) => Ok(b),
            _ => Err(self.mismatch(name, "length-delimited")),
        }
    }

    /// Returns the payload as UTF-8 text.
    pub fn expect_string(&self, name: &str) -> CodecResult<&'a str> {
        std::str::from_utf8(self.expect_bytes(name)?)
            .map_err(|_| CodecError::corrupt(format!("field {name} is not valid UTF-8")))
    }

    fn mismatch(&self, name: &str, expected: &str) -> CodecError {
        CodecError::corrupt(format!(
            "field {name} (#{}) has wire type {:?}, expected {expected}",
            self.number, self.value
        ))
    }
}

/// Iterates over the fields of a message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader over an encoded message.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns true once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads the next field, or `None` at the end of the message.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Corrupt`] on truncation, an invalid key or an
    /// overlong varint.
    pub fn next_field(&mut self) -> CodecResult<Option<Field<'a>>> {
        if self.is_empty() {
            return Ok(None);
        }

        let start = self.pos;
        let key = self.varint()?;
        let number = u32::try_from(key >> 3)
            .ok()
            .filter(|n| (1..=MAX_FIELD_NUMBER).contains(n))
            .ok_or_else(|| CodecError::corrupt(format!("invalid field number in key {key:#x}")))?;
        #[allow(clippy::cast_possible_truncation)]
        let wire_type = WireType::from_bits((key & 0x7) as u8)?;

        let value = match wire_type {
            WireType::Varint => FieldValue::Varint(self.varint()?),
            WireType::Fixed64 => {
                let mut b = self.take(8)?;
                FieldValue::Fixed64(b.get_u64_le())
            }
            WireType::LengthDelimited => {
                let len = usize::try_from(self.varint()?)
                    .map_err(|_| CodecError::corrupt("length prefix does not fit in memory"))?;
                FieldValue::Bytes(self.take(len)?)
            }
            WireType::Fixed32 => {
                let mut b = self.take(4)?;
                FieldValue::Fixed32(b.get_u32_le())
            }
        };

        Ok(Some(Field {
            number,
            value,
            raw: &self.data[start..self.pos],
        }))
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.data.len() - self.pos {
            return Err(CodecError::truncated("field value"));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn varint(&mut self) -> CodecResult<u64> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = *self
                .data
                .get(self.pos)
                .ok_or_else(|| CodecError::truncated("varint"))?;
            self.pos += 1;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::corrupt("varint longer than 10 bytes"))
    }
}

/// Fields a reader did not recognise, kept byte-for-byte in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields(Vec<u8>);

impl UnknownFields {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `field` for re-encoding.
    pub fn push(&mut self, field: &Field<'_>) {
        self.0.extend_from_slice(field.raw);
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if a field numbered `number` was captured.
    pub fn contains(&self, number: u32) -> bool {
        self.fields().any(|f| f.number == number)
    }

    /// Returns a copy without any field numbered `number`.
    pub fn without(&self, number: u32) -> Self {
        let mut kept = Self::new();
        for field in self.fields().filter(|f| f.number != number) {
            kept.push(&field);
        }
        kept
    }

    // Captured bytes were produced by `push`, so they always parse.
    fn fields(&self) -> impl Iterator<Item = Field<'_>> {
        let mut reader = WireReader::new(&self.0);
        std::iter::from_fn(move || reader.next_field().ok().flatten())
    }
}
