//! Persisted id counters
//!
//! Generated record ids carry a numeric suffix handed out by a monotonic
//! counter. The counter is persisted under its own store key and advances
//! durably before a number is used, so an id is never reissued after its
//! record is deleted, in this process or any later one.

use std::sync::Arc;

use serde_json::Value;

use crate::error::CredoResult;
use crate::store::KeyValueStore;

pub struct PersistedSequence {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    next: u64,
}

impl PersistedSequence {
    /// Open the counter stored under `key`, starting no lower than `floor`
    ///
    /// The floor is derived from existing records, so a store written
    /// before counters were persisted still opens past every id in use.
    /// An unreadable slot is treated as absent.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        key: &'static str,
        floor: u64,
    ) -> CredoResult<Self> {
        let stored = match store.get(key)? {
            Some(value) => match value.as_u64() {
                Some(n) => n,
                None => {
                    log::warn!("resetting unreadable sequence '{}'", key);
                    0
                }
            },
            None => 0,
        };

        let sequence = Self {
            store,
            key,
            next: stored.max(floor),
        };
        if sequence.next > stored {
            sequence.persist()?;
        }
        Ok(sequence)
    }

    /// Hand out the next number; the advanced counter is durable before
    /// the number is returned
    pub fn advance(&mut self) -> CredoResult<u64> {
        let issued = self.next;
        self.next = self.next.saturating_add(1);
        self.persist()?;
        Ok(issued)
    }

    /// Move the counter past an externally supplied number
    pub fn advance_past(&mut self, seen: u64) -> CredoResult<()> {
        let candidate = seen.saturating_add(1);
        if candidate > self.next {
            self.next = candidate;
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> CredoResult<()> {
        self.store.set(self.key, Value::from(self.next))
    }
}
