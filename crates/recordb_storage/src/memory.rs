//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::io;
use std::path::PathBuf;

/// An in-memory storage backend.
///
/// Suitable for unit and integration tests that exercise the record
/// store without touching the file system. A backend can also be made
/// unreadable to simulate permission failures.
///
/// # Example
///
/// ```rust
/// use recordb_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::with_data(b"test data".to_vec());
/// assert!(backend.exists().unwrap());
/// assert_eq!(backend.read_all().unwrap(), b"test data");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: Option<Vec<u8>>,
    read_failure: Option<io::ErrorKind>,
}

impl InMemoryBackend {
    /// Creates a new backend with nothing stored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with pre-existing data.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            read_failure: None,
        }
    }

    /// Creates a backend whose reads fail with `kind`, as a file the
    /// process may not open would.
    #[must_use]
    pub fn unreadable(kind: io::ErrorKind) -> Self {
        Self {
            data: Some(Vec::new()),
            read_failure: Some(kind),
        }
    }

    /// Returns a copy of the stored data, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.clone()
    }
}

impl StorageBackend for InMemoryBackend {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn exists(&self) -> StorageResult<bool> {
        Ok(self.data.is_some())
    }

    fn read_all(&self) -> StorageResult<Vec<u8>> {
        if let Some(kind) = self.read_failure {
            return Err(StorageError::Io(io::Error::new(kind, "simulated read failure")));
        }
        self.data.clone().ok_or_else(|| StorageError::NotFound {
            path: PathBuf::from(self.location()),
        })
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        self.data = Some(data.to_vec());
        self.read_failure = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(!backend.exists().unwrap());
        assert!(backend.data().is_none());
        assert!(backend.read_all().unwrap_err().is_not_found());
    }

    #[test]
    fn replace_then_read() {
        let mut backend = InMemoryBackend::new();
        backend.replace(b"hello").unwrap();
        backend.replace(b"world").unwrap();

        assert_eq!(backend.read_all().unwrap(), b"world");
    }

    #[test]
    fn empty_payload_still_exists() {
        let mut backend = InMemoryBackend::new();
        backend.replace(b"").unwrap();

        assert!(backend.exists().unwrap());
        assert!(backend.read_all().unwrap().is_empty());
    }

    #[test]
    fn unreadable_backend_fails_with_io() {
        let backend = InMemoryBackend::unreadable(io::ErrorKind::PermissionDenied);
        let err = backend.read_all().unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, StorageError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn replace_clears_read_failure() {
        let mut backend = InMemoryBackend::unreadable(io::ErrorKind::PermissionDenied);
        backend.replace(b"fresh").unwrap();

        assert_eq!(backend.read_all().unwrap(), b"fresh");
    }
}
