//! Error types for recordb core.

use recordb_codec::CodecError;
use recordb_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in recordb core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A builder invariant was violated. The caller can retry with
    /// corrected input.
    #[error("validation failed: {message}")]
    Validation {
        /// Which invariant failed.
        message: String,
    },

    /// Decoding found bytes inconsistent with the format. Nothing was
    /// written.
    #[error("corrupt payload: {message}")]
    CorruptPayload {
        /// Description of the inconsistency.
        message: String,
    },

    /// Decoding found a version tag newer than this build understands.
    #[error("unsupported {what} version {found} (newest supported is {max_supported})")]
    UnsupportedVersion {
        /// Which version tag was rejected.
        what: &'static str,
        /// The version found.
        found: u64,
        /// The newest version understood.
        max_supported: u64,
    },

    /// The file does not exist.
    #[error("{}: path does not exist", path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Storage backend error other than "not found".
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// A collection could not be encoded.
    #[error("encoding failed: {message}")]
    Encoding {
        /// Description of the failure.
        message: String,
    },
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a corrupt payload error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptPayload {
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }
}

impl From<CodecError> for CoreError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Corrupt { message } => Self::CorruptPayload { message },
            CodecError::UnsupportedVersion {
                what,
                found,
                max_supported,
            } => Self::UnsupportedVersion {
                what,
                found,
                max_supported,
            },
            CodecError::EncodingFailed { message } => Self::Encoding { message },
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { path } => Self::PathNotFound { path },
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn codec_errors_map_onto_taxonomy() {
        assert!(matches!(
            CoreError::from(CodecError::corrupt("bad")),
            CoreError::CorruptPayload { message } if message == "bad"
        ));
        assert!(matches!(
            CoreError::from(CodecError::unsupported_version("record", 3, 2)),
            CoreError::UnsupportedVersion { found: 3, max_supported: 2, .. }
        ));
    }

    #[test]
    fn storage_not_found_is_path_not_found() {
        let err = CoreError::from(StorageError::NotFound {
            path: PathBuf::from("x.bin"),
        });
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "x.bin: path does not exist");
    }

    #[test]
    fn other_storage_errors_are_wrapped() {
        let err = CoreError::from(StorageError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(!err.is_not_found());
    }
}
