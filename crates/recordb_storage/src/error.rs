//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing has been stored at the location yet.
    #[error("{}: path does not exist", path.display())]
    NotFound {
        /// The location that was looked up.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Classifies an I/O error raised while touching `path`.
    ///
    /// `ErrorKind::NotFound` becomes [`StorageError::NotFound`]; everything
    /// else stays an I/O error.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }

    /// Returns true if this error means "nothing stored yet".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kind_is_classified() {
        let err = StorageError::from_io(
            "missing.bin",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "missing.bin: path does not exist");
    }

    #[test]
    fn other_kinds_stay_io() {
        let err = StorageError::from_io(
            "locked.bin",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(matches!(err, StorageError::Io(_)));
    }
}
