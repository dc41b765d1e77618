//! Key/value backends for the persisted session credential.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to encode session file: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Persistent string storage keyed by name.
pub trait TokenStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage backed by a small TOML file of `key = "value"` pairs.
///
/// The whole file is rewritten on every change. A missing file reads as empty.
pub struct FileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string(entries)?;
        fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl TokenStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

/// In-process storage, used by tests and one-shot runs.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("session.toml"));
        assert_eq!(storage.read("access_token").unwrap(), None);
    }

    #[test]
    fn write_then_read_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        FileStorage::new(path.clone())
            .write("access_token", "abc")
            .unwrap();

        let reopened = FileStorage::new(path);
        assert_eq!(
            reopened.read("access_token").unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("session.toml"));
        storage.write("access_token", "abc").unwrap();
        storage.write("other", "keep").unwrap();

        storage.remove("access_token").unwrap();

        assert_eq!(storage.read("access_token").unwrap(), None);
        assert_eq!(storage.read("other").unwrap().as_deref(), Some("keep"));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "not = [valid").unwrap();

        let storage = FileStorage::new(path);
        assert!(matches!(
            storage.read("access_token"),
            Err(StorageError::Parse { .. })
        ));
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }
}
