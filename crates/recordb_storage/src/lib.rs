//! # recordb storage
//!
//! Whole-file storage backends for recordb.
//!
//! Backends are **opaque byte stores** holding exactly one encoded record
//! collection. They never interpret the bytes they hold; the codecs in
//! `recordb_core` own the format.
//!
//! ## Design Principles
//!
//! - A backend is read completely or replaced completely
//! - "Not found" is reported as its own error so callers can treat a
//!   missing file as an empty collection
//! - Every file handle is opened for a single operation and closed before
//!   the call returns, on success and on failure
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use recordb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(!backend.exists().unwrap());
//! backend.replace(b"hello world").unwrap();
//! assert_eq!(backend.read_all().unwrap(), b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
