//! Key-value substrate backing the document store.
//!
//! The substrate is a flat, synchronous string-to-string map keyed by
//! collection name. Values are serialized JSON arrays of documents.
//!
//! Two implementations are provided:
//! - [`MemoryStore`]: process-local map, used for tests and ephemeral runs.
//! - [`FileStore`]: one `<key>.json` file per key in a data directory.
//!
//! ```text
//! ~/.local/share/genaifit/
//! ├── auth_token.json
//! ├── users.json
//! ├── workouts.json
//! ├── food_logs.json
//! ├── meal_plans.json
//! └── schedules.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// File extension for persisted values.
const VALUE_EXTENSION: &str = "json";

/// Errors raised by a key-value substrate.
#[derive(Error, Debug)]
pub enum KvError {
    #[error("I/O error for {}: {1}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("Invalid key '{0}'")]
    InvalidKey(String),
}

/// Synchronous get/set/remove mapping used as the persistence substrate.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<(), KvError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

/// In-memory substrate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the guard cannot leave a half-written value.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Directory-backed substrate.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new store rooted at `data_dir`.
    ///
    /// The directory is created on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> Result<PathBuf, KvError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Io(path, e)),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|e| KvError::Io(self.data_dir.clone(), e))?;
        fs::write(&path, value).map_err(|e| KvError::Io(path, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KvError::Io(path, e)),
        }
    }
}
