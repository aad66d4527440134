//! # recordb codec
//!
//! Format primitives for recordb, independent of any record type.
//!
//! - [`envelope`]: the native framing, where every record carries the
//!   schema version it was written under, with CBOR bodies
//! - [`wire`]: protobuf-compatible field encoding with unknown-field
//!   capture
//!
//! `recordb_core` maps its entities onto these primitives.
//!
//! ## Usage
//!
//! ```
//! use recordb_codec::envelope::{read_envelope, write_envelope, RawRecord};
//!
//! let bytes = write_envelope(&[RawRecord::new(2, vec![0xa0])]).unwrap();
//! let records = read_envelope(&bytes).unwrap();
//! assert_eq!(records[0].version, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
mod error;
pub mod wire;

pub use error::{CodecError, CodecResult};
