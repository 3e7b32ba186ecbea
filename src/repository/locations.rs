//! Location repository

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::records::Location;
use crate::seed;
use crate::sequence::PersistedSequence;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "locations";

const SEQUENCE_KEY: &str = "locationsNextSeq";
const ENTITY: &str = "location";
const ID_PREFIX: &str = "LOC";

/// Caller-supplied location fields; ids are always generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub status: String,
}

pub struct LocationRepository {
    collection: PersistedCollection<Location>,
    sequence: PersistedSequence,
}

impl LocationRepository {
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let collection = PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::locations)?;
        let sequence =
            PersistedSequence::open(store, SEQUENCE_KEY, next_sequence(collection.records()))?;
        Ok(Self {
            collection,
            sequence,
        })
    }

    /// All locations in insertion order
    pub fn list(&self) -> &[Location] {
        self.collection.records()
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.collection.records().iter().find(|l| l.id == id)
    }

    pub fn create(&mut self, draft: LocationDraft) -> CredoResult<Location> {
        let location = Location {
            id: self.generate_id()?,
            name: draft.name,
            location_type: draft.location_type,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip: draft.zip,
            phone: draft.phone,
            status: draft.status,
        };

        self.collection.push(location.clone())?;
        log::info!("created location {}", location.id);
        Ok(location)
    }

    pub fn update(&mut self, id: &str, draft: LocationDraft) -> CredoResult<Location> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        let location = Location {
            id: id.to_string(),
            name: draft.name,
            location_type: draft.location_type,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip: draft.zip,
            phone: draft.phone,
            status: draft.status,
        };

        self.collection.replace(position, location.clone())?;
        log::info!("updated location {}", location.id);
        Ok(location)
    }

    pub fn delete(&mut self, id: &str) -> CredoResult<()> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        self.collection.remove(position)?;
        log::info!("deleted location {}", id);
        Ok(())
    }

    fn generate_id(&mut self) -> CredoResult<String> {
        let seq = self.sequence.advance()?;
        Ok(format!("{}-{:03}", ID_PREFIX, seq))
    }
}

fn id_sequence(id: &str) -> Option<u64> {
    id.rsplit('-').next()?.parse().ok()
}

fn next_sequence(records: &[Location]) -> u64 {
    records
        .iter()
        .filter_map(|l| id_sequence(&l.id))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
