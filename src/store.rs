//! Key-value storage backends
//!
//! Every collection in the system is persisted as one JSON value under a
//! well-known key. Implementations can use different storage backends
//! (file, in-memory, cloud, etc.) as long as writes are durable by the
//! time `set` returns.

use crate::error::{CredoError, CredoResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Abstract key-value store holding whole JSON documents
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, if any
    fn get(&self, key: &str) -> CredoResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: Value) -> CredoResult<()>;

    /// Remove the value stored under `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> CredoResult<()>;

    /// Check whether a value exists under `key`
    fn contains(&self, key: &str) -> CredoResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// File-backed store keeping all keys in a single pretty-printed JSON object
///
/// The whole map is rewritten on every mutation. Collections here are small
/// and the full rewrite keeps the on-disk file consistent with memory.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing entries if the file exists
    pub fn open<P: AsRef<Path>>(path: P) -> CredoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                CredoError::StorageLoadFailed(format!("{}: {}", path.display(), e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                CredoError::StorageLoadFailed(format!("{}: {}", path.display(), e))
            })?
        } else {
            Map::new()
        };
        log::debug!("opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &Map<String, Value>) -> CredoResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .map_err(|e| CredoError::StorageSaveFailed(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> CredoResult<Option<Value>> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> CredoResult<()> {
        let mut entries = self.entries.lock()?;
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> CredoResult<()> {
        let mut entries = self.entries.lock()?;
        entries.remove(key);
        self.persist(&entries)
    }
}

/// In-memory store for tests and embedders that manage durability themselves
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Map::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CredoResult<Option<Value>> {
        let entries = self.entries.lock()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> CredoResult<()> {
        let mut entries = self.entries.lock()?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> CredoResult<()> {
        let mut entries = self.entries.lock()?;
        entries.remove(key);
        Ok(())
    }
}
