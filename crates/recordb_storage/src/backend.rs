//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-file storage backend.
///
/// Backends hold one opaque byte payload. They are read in full and
/// replaced in full; there is no partial update.
///
/// # Invariants
///
/// - `read_all` returns exactly the bytes passed to the last `replace`
/// - `read_all` on a backend that was never written fails with
///   [`crate::StorageError::NotFound`]
/// - `replace` discards the previous payload entirely
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend {
    /// Human readable location used in diagnostics (a file path for
    /// [`super::FileBackend`]).
    fn location(&self) -> String;

    /// Returns true if a payload has been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if existence cannot be determined.
    fn exists(&self) -> StorageResult<bool>;

    /// Reads the whole payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFound`] if nothing is stored, or an
    /// I/O error if the payload cannot be read.
    fn read_all(&self) -> StorageResult<Vec<u8>>;

    /// Replaces the whole payload with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written.
    fn replace(&mut self, data: &[u8]) -> StorageResult<()>;
}
