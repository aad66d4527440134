//! The record store.
//!
//! Files are read and written whole. `append` reads the existing
//! collection, adds one employee at the end and rewrites the file:
//!
//! ```text
//! read_all ──► decode ──► push ──► encode ──► replace
//!    │
//!    └─ not found ──► empty collection
//! ```
//!
//! The read-modify-write sequence is not transactional. Two processes
//! appending to the same file at once can lose one of the updates; the
//! store assumes a single writer and does not lock.

use crate::collection::EmployeeCollection;
use crate::config::{ReadFailurePolicy, StoreConfig};
use crate::entity::Employee;
use crate::error::CoreResult;
use crate::format::RecordCodec;
use recordb_storage::{FileBackend, StorageBackend};
use std::path::Path;
use tracing::{info, warn};

/// The result of listing a file.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Where the records were read from.
    pub path: String,
    /// False if the file does not exist.
    pub exists: bool,
    /// The records, in file order. Empty if the file does not exist.
    pub records: EmployeeCollection,
}

/// Reads and writes employee files in one configured format.
///
/// Path-based operations open a [`FileBackend`] for the duration of the
/// call; the `*_to` / `*_from` variants work on any [`StorageBackend`].
///
/// # Example
///
/// ```no_run
/// use recordb_core::{sample, CodecKind, RecordStore, StoreConfig};
///
/// let store = RecordStore::new(StoreConfig::new().codec(CodecKind::Native));
/// store.append("employees.bin", sample::employee_one()).unwrap();
///
/// let listing = store.list_all("employees.bin").unwrap();
/// assert!(listing.exists);
/// ```
#[derive(Debug)]
pub struct RecordStore {
    config: StoreConfig,
    codec: Box<dyn RecordCodec>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl RecordStore {
    /// Creates a store.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let codec = config.codec.codec();
        Self { config, codec }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the codec files are read and written with.
    #[must_use]
    pub fn codec(&self) -> &dyn RecordCodec {
        self.codec.as_ref()
    }

    fn file(&self, path: &Path) -> FileBackend {
        FileBackend::new(path).with_atomic_writes(self.config.atomic_writes)
    }

    /// Appends `employee` to the file at `path`, creating it if missing.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::append_to`].
    pub fn append(&self, path: impl AsRef<Path>, employee: Employee) -> CoreResult<()> {
        self.append_to(&mut self.file(path.as_ref()), employee)
    }

    /// Lists the file at `path`. A missing file is reported through
    /// [`Listing::exists`], not as an error.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::list_from`].
    pub fn list_all(&self, path: impl AsRef<Path>) -> CoreResult<Listing> {
        self.list_from(&self.file(path.as_ref()))
    }

    /// Writes `employees` to `path`, replacing its contents.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::save_to`].
    pub fn save(&self, path: impl AsRef<Path>, employees: &EmployeeCollection) -> CoreResult<()> {
        self.save_to(&mut self.file(path.as_ref()), employees)
    }

    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::load_from`].
    pub fn load(&self, path: impl AsRef<Path>) -> CoreResult<EmployeeCollection> {
        self.load_from(&self.file(path.as_ref()))
    }

    /// Reads the existing collection, appends `employee` and writes the
    /// result back.
    ///
    /// Existing records are written back unchanged and in order.
    ///
    /// # Errors
    ///
    /// - [`crate::CoreError::CorruptPayload`] or
    ///   [`crate::CoreError::UnsupportedVersion`] if the existing payload
    ///   does not decode; nothing is written
    /// - [`crate::CoreError::Storage`] if the payload cannot be read and
    ///   the policy is [`ReadFailurePolicy::Fail`], or it cannot be written
    pub fn append_to(
        &self,
        backend: &mut dyn StorageBackend,
        employee: Employee,
    ) -> CoreResult<()> {
        let mut employees = self.read_existing(backend)?;
        employees.push(employee);
        self.save_to(backend, &employees)
    }

    fn read_existing(&self, backend: &dyn StorageBackend) -> CoreResult<EmployeeCollection> {
        match backend.read_all() {
            Ok(bytes) => self.codec.decode(&bytes),
            Err(err) if err.is_not_found() => {
                warn!("{}: path does not exist. Creating file.", backend.location());
                Ok(EmployeeCollection::new())
            }
            Err(err) => match self.config.read_failure {
                ReadFailurePolicy::StartEmpty => {
                    warn!(
                        "{}: could not be read ({err}). Starting with no records.",
                        backend.location()
                    );
                    Ok(EmployeeCollection::new())
                }
                ReadFailurePolicy::Fail => Err(err.into()),
            },
        }
    }

    /// Lists every record in `backend`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload exists but cannot be read or
    /// decoded.
    pub fn list_from(&self, backend: &dyn StorageBackend) -> CoreResult<Listing> {
        let path = backend.location();
        match backend.read_all() {
            Ok(bytes) => Ok(Listing {
                path,
                exists: true,
                records: self.codec.decode(&bytes)?,
            }),
            Err(err) if err.is_not_found() => Ok(Listing {
                path,
                exists: false,
                records: EmployeeCollection::new(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Encodes `employees` and replaces the payload of `backend`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_to(
        &self,
        backend: &mut dyn StorageBackend,
        employees: &EmployeeCollection,
    ) -> CoreResult<()> {
        let bytes = self.codec.encode(employees)?;
        backend.replace(&bytes)?;
        info!(
            "Wrote {} records to {} ({})",
            employees.len(),
            backend.location(),
            self.config.codec
        );
        Ok(())
    }

    /// Reads and decodes the payload of `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::PathNotFound`] if nothing is stored, or
    /// a read or decode error.
    pub fn load_from(&self, backend: &dyn StorageBackend) -> CoreResult<EmployeeCollection> {
        let bytes = backend.read_all()?;
        self.codec.decode(&bytes)
    }
}
