//! Record store configuration.

use crate::format::CodecKind;

/// What `append` does when the existing file exists but cannot be read.
///
/// A missing file always starts an empty collection, and a file that was
/// read but does not decode always fails. This policy only covers other
/// read errors such as a permission failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFailurePolicy {
    /// Log a warning and continue with an empty collection. The unreadable
    /// file is then overwritten.
    #[default]
    StartEmpty,
    /// Return the read error and leave the file alone.
    Fail,
}

/// Configuration for a [`crate::RecordStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Format used to read and write files.
    pub codec: CodecKind,

    /// Behaviour when an existing file cannot be read during `append`.
    pub read_failure: ReadFailurePolicy,

    /// Whether to replace files via a synced temporary file and rename.
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            codec: CodecKind::default(),
            read_failure: ReadFailurePolicy::default(),
            atomic_writes: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file format.
    #[must_use]
    pub const fn codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the unreadable-file policy.
    #[must_use]
    pub const fn read_failure(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure = policy;
        self
    }

    /// Sets whether writes go through a temporary file.
    #[must_use]
    pub const fn atomic_writes(mut self, value: bool) -> Self {
        self.atomic_writes = value;
        self
    }
}
