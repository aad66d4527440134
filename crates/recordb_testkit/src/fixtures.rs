//! Temporary record files.

use recordb_core::{CodecKind, EmployeeCollection, RecordStore, StoreConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A record file path inside a temporary directory, with a store
/// configured for one codec. The directory is removed on drop.
pub struct TempRecordFile {
    store: RecordStore,
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TempRecordFile {
    /// Creates a fixture whose file does not exist yet.
    pub fn new(codec: CodecKind) -> Self {
        Self::with_config(StoreConfig::new().codec(codec))
    }

    /// Creates a fixture with a custom store configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_name = format!("employees.{}", config.codec);
        let path = temp_dir.path().join(file_name);
        Self {
            store: RecordStore::new(config),
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the record file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record, panicking on failure.
    pub fn load(&self) -> EmployeeCollection {
        self.store.load(&self.path).expect("Failed to load record file")
    }

    /// Writes raw bytes to the record file.
    pub fn write_raw(&self, bytes: &[u8]) {
        std::fs::write(&self.path, bytes).expect("Failed to write record file");
    }

    /// Reads the raw bytes of the record file.
    pub fn read_raw(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("Failed to read record file")
    }
}

/// Runs `f` once per codec with a fresh fixture.
pub fn for_each_codec<F>(mut f: F)
where
    F: FnMut(CodecKind, &TempRecordFile),
{
    for kind in CodecKind::ALL {
        let file = TempRecordFile::new(kind);
        f(kind, &file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordb_core::sample;

    #[test]
    fn file_starts_missing() {
        let file = TempRecordFile::new(CodecKind::Wire);
        assert!(!file.path().exists());
        assert!(!file.store().list_all(file.path()).unwrap().exists);
    }

    #[test]
    fn directory_removed_on_drop() {
        let dir = {
            let file = TempRecordFile::new(CodecKind::Native);
            file.store()
                .save(file.path(), &sample::employees())
                .unwrap();
            file.path().parent().unwrap().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn visits_every_codec() {
        let mut seen = Vec::new();
        for_each_codec(|kind, file| {
            file.store()
                .append(file.path(), sample::employee_one())
                .unwrap();
            assert_eq!(file.load().len(), 1);
            seen.push(kind);
        });
        assert_eq!(seen, CodecKind::ALL.to_vec());
    }
}
