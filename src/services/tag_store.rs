//! Persistence boundary for the review and completed tag sets.
//!
//! Stores behave like a small string key-value map. Each tag set is kept
//! under its own key as a JSON array of card ids. Reads fail soft and
//! writes are best-effort, so a broken store never takes the viewer down.

use crate::config::{APP_DIR_NAME, DATA_DIR_ENV};
use crate::error::{AppError, Result};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Set of card ids carrying one tag.
pub type TagSet = BTreeSet<String>;

/// Key-value persistence for tag sets.
pub trait TagStore {
    /// Returns the raw value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the raw value stored under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Loads the tag set stored under `key`.
    ///
    /// Missing, unreadable and malformed values all yield an empty set.
    fn load_set(&self, key: &str) -> TagSet {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return TagSet::new(),
            Err(e) => {
                warn!("Could not read {}: {}", key, e);
                return TagSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", key, e);
                TagSet::new()
            }
        }
    }

    /// Saves `set` under `key`. Failures are logged and dropped.
    fn save_set(&mut self, key: &str, set: &TagSet) {
        let json = match serde_json::to_string(set) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.set(key, json) {
            warn!("Could not save {}: {}", key, e);
        }
    }
}

impl<T: TagStore + ?Sized> TagStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Tag store backed by one JSON file per key.
pub struct FileTagStore {
    dir: PathBuf,
}

impl FileTagStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::TagStore(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        debug!("Tag store directory: {}", dir.display());
        Ok(Self { dir })
    }

    /// Opens the store in the application data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(default_data_dir())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl TagStore for FileTagStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::TagStore(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).map_err(|e| {
            AppError::TagStore(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// In-memory tag store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryTagStore {
    values: HashMap<String, String>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagStore for MemoryTagStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Directory for tag files: `FLASHCARDS_DATA_DIR`, else the platform data dir.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Opens the file store, degrading to memory when the directory is unusable.
pub fn open_default_store() -> Box<dyn TagStore + Send> {
    match FileTagStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Marks will not persist this session: {}", e);
            Box::new(MemoryTagStore::new())
        }
    }
}
