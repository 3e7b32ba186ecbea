//! Payer repository

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::records::Payer;
use crate::seed;
use crate::sequence::PersistedSequence;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "payers";

const SEQUENCE_KEY: &str = "payersNextSeq";
const ENTITY: &str = "payer";
const ID_PREFIX: &str = "PAY";

/// Caller-supplied payer fields; ids are always generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub payer_type: String,
    /// External payer identifier (wire key `payerId`)
    #[serde(rename = "payerId")]
    pub external_id: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub status: String,
}

pub struct PayerRepository {
    collection: PersistedCollection<Payer>,
    sequence: PersistedSequence,
}

impl PayerRepository {
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let collection = PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::payers)?;
        let sequence =
            PersistedSequence::open(store, SEQUENCE_KEY, next_sequence(collection.records()))?;
        Ok(Self {
            collection,
            sequence,
        })
    }

    /// All payers in insertion order
    pub fn list(&self) -> &[Payer] {
        self.collection.records()
    }

    pub fn get(&self, id: &str) -> Option<&Payer> {
        self.collection.records().iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, draft: PayerDraft) -> CredoResult<Payer> {
        let payer = Payer {
            id: self.generate_id()?,
            name: draft.name,
            payer_type: draft.payer_type,
            external_id: draft.external_id,
            contact: draft.contact,
            phone: draft.phone,
            email: draft.email,
            status: draft.status,
        };

        self.collection.push(payer.clone())?;
        log::info!("created payer {}", payer.id);
        Ok(payer)
    }

    pub fn update(&mut self, id: &str, draft: PayerDraft) -> CredoResult<Payer> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        let payer = Payer {
            id: id.to_string(),
            name: draft.name,
            payer_type: draft.payer_type,
            external_id: draft.external_id,
            contact: draft.contact,
            phone: draft.phone,
            email: draft.email,
            status: draft.status,
        };

        self.collection.replace(position, payer.clone())?;
        log::info!("updated payer {}", payer.id);
        Ok(payer)
    }

    pub fn delete(&mut self, id: &str) -> CredoResult<()> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        self.collection.remove(position)?;
        log::info!("deleted payer {}", id);
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

fn next_sequence(records: &[Payer]) -> u64 {
    records
        .iter()
        .filter_map(|p| id_sequence(&p.id))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
