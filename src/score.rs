use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::StoreError;

const APP_DIR_NAME: &str = "grid-snake";
const STORE_FILE_NAME: &str = "store.json";

/// Key under which the best score is persisted.
pub const HIGH_SCORE_KEY: &str = "snake-high-score";

/// String key-value persistence injected into the engine.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Flat JSON object of string values kept in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the store at the platform-correct data path.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(default_store_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_error = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(io_error)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }
}

/// Returns the platform-correct store file path.
#[must_use]
pub fn default_store_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STORE_FILE_NAME);
    base
}

/// Best-score bookkeeping on top of a [`KeyValueStore`].
///
/// Store failures never reach the game: reads degrade to 0 and failed
/// writes are logged and dropped.
#[derive(Debug, Clone)]
pub struct ScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the best score, or 0 when absent or unreadable.
    #[must_use]
    pub fn get(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u32>().unwrap_or_else(|error| {
                warn!(%error, value = %raw, "ignoring unparsable high score");
                0
            }),
            Ok(None) => 0,
            Err(error) => {
                warn!(%error, "failed to read high score");
                0
            }
        }
    }

    /// Records `value` when it beats the stored best. Returns whether it was written.
    pub fn set_if_greater(&mut self, value: u32) -> bool {
        if value <= self.get() {
            return false;
        }

        match self.store.set(HIGH_SCORE_KEY, &value.to_string()) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, score = value, "failed to save high score");
                false
            }
        }
    }
}
