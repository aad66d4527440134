//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file-based storage backend.
///
/// The backend only remembers a path. Each operation opens the file,
/// does its work and drops the handle before returning, so no handle
/// outlives a call even when the call fails.
///
/// # Durability
///
/// With atomic writes enabled (the default) `replace` uses the
/// write-then-rename pattern:
/// 1. Write to a sibling temporary file
/// 2. Sync the temporary file to disk
/// 3. Rename it over the target
///
/// A crash mid-write therefore leaves either the old or the new payload,
/// never a torn one. This does not make read-modify-write sequences safe
/// against a second concurrent writer; callers are expected to be the only
/// writer of a given path.
///
/// # Example
///
/// ```no_run
/// use recordb_storage::{StorageBackend, FileBackend};
///
/// let mut backend = FileBackend::new("people.bin");
/// backend.replace(b"persistent data").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    atomic_writes: bool,
}

impl FileBackend {
    /// Creates a backend for the file at `path`.
    ///
    /// Nothing is opened or created until the first operation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            atomic_writes: true,
        }
    }

    /// Enables or disables write-then-rename on `replace`.
    #[must_use]
    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_direct(&self, data: &[u8]) -> StorageResult<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }

    fn write_atomic(&self, data: &[u8]) -> StorageResult<()> {
        let temp_path = self.temp_path();

        let written = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(err) = written {
            // Leftover temp files would otherwise accumulate next to the target.
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Io(err));
        }

        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> StorageResult<bool> {
        Ok(self.path.try_exists()?)
    }

    fn read_all(&self) -> StorageResult<Vec<u8>> {
        let mut file = File::open(&self.path).map_err(|e| StorageError::from_io(&self.path, e))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        debug!(path = %self.path.display(), bytes = buffer.len(), "read file");
        Ok(buffer)
    }

    fn replace(&mut self, data: &[u8]) -> StorageResult<()> {
        if self.atomic_writes {
            self.write_atomic(data)?;
        } else {
            self.write_direct(data)?;
        }
        debug!(path = %self.path.display(), bytes = data.len(), atomic = self.atomic_writes, "replaced file");
        Ok(())
    }
}
