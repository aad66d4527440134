//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The bytes do not match the expected framing or schema.
    #[error("corrupt payload: {message}")]
    Corrupt {
        /// Description of what did not match.
        message: String,
    },

    /// The payload carries a version tag newer than this reader knows.
    #[error("unsupported {what} version {found} (newest supported is {max_supported})")]
    UnsupportedVersion {
        /// Which version tag was rejected (container, record, document).
        what: &'static str,
        /// The version found in the payload.
        found: u64,
        /// The newest version this reader understands.
        max_supported: u64,
    },

    /// A value could not be encoded.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },
}

impl CodecError {
    /// Create a corrupt payload error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// Create an unexpected end of input error.
    pub fn truncated(context: &str) -> Self {
        Self::Corrupt {
            message: format!("unexpected end of input while reading {context}"),
        }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(what: &'static str, found: u64, max_supported: u64) -> Self {
        Self::UnsupportedVersion {
            what,
            found,
            max_supported,
        }
    }

    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }
}
