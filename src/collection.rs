//! Generic persisted collection
//!
//! One collection is one JSON array under one well-known store key. The
//! whole array is loaded at open and rewritten on every save; repositories
//! never patch individual records in place.

use crate::error::{CredoError, CredoResult};
use crate::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub struct PersistedCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    records: Vec<T>,
}

impl<T: Serialize + DeserializeOwned> PersistedCollection<T> {
    /// Open the collection stored under `key`
    ///
    /// An absent key installs and persists the `seed` records. A present
    /// value that fails to deserialize is surfaced as an error; stored
    /// data is never silently replaced with seeds.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        key: &'static str,
        seed: fn() -> Vec<T>,
    ) -> CredoResult<Self> {
        match store.get(key)? {
            Some(value) => {
                let records: Vec<T> = serde_json::from_value(value).map_err(|e| {
                    CredoError::SerializationError(format!("collection '{}': {}", key, e))
                })?;
                log::debug!("loaded collection '{}' ({} records)", key, records.len());
                Ok(Self {
                    store,
                    key,
                    records,
                })
            }
            None => {
                let records = seed();
                log::info!("seeding collection '{}' ({} records)", key, records.len());
                let collection = Self {
                    store,
                    key,
                    records,
                };
                collection.save()?;
                Ok(collection)
            }
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Mutable access; callers must `save` once their change is complete
    pub fn records_mut(&mut self) -> &mut Vec<T> {
        &mut self.records
    }

    /// Append a record and persist; the push is undone if the write fails
    pub fn push(&mut self, record: T) -> CredoResult<()> {
        self.records.push(record);
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace the record at `position` and persist; the previous record
    /// is restored if the write fails
    pub fn replace(&mut self, position: usize, record: T) -> CredoResult<()> {
        let previous = std::mem::replace(&mut self.records[position], record);
        if let Err(e) = self.save() {
            self.records[position] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Remove the record at `position` and persist; the record is
    /// reinserted at its position if the write fails
    pub fn remove(&mut self, position: usize) -> CredoResult<T> {
        let removed = self.records.remove(position);
        if let Err(e) = self.save() {
            self.records.insert(position, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Rewrite the entire collection under its key
    pub fn save(&self) -> CredoResult<()> {
        let value = serde_json::to_value(&self.records)?;
        self.store.set(self.key, value)
    }
}
