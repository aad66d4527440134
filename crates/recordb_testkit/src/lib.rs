//! # recordb testkit
//!
//! Test utilities for recordb.
//!
//! This crate provides:
//! - Property-based generators for employees and collections
//! - Temporary record files that clean up after themselves
//!
//! ## Usage
//!
//! ```rust
//! use recordb_testkit::prelude::*;
//! use recordb_core::{sample, CodecKind};
//!
//! let file = TempRecordFile::new(CodecKind::Native);
//! file.store().append(file.path(), sample::employee_one()).unwrap();
//! assert_eq!(file.load().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
