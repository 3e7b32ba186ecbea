//! Enrollment repository
//!
//! Enrollments reference providers and payers by id only. References stay
//! weak: deleting either side leaves the enrollment in place, and display
//! joins fall back to sentinel names.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::records::{Enrollment, Payer, Provider};
use crate::repository::payers::PayerRepository;
use crate::repository::providers::ProviderRepository;
use crate::seed;
use crate::sequence::PersistedSequence;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "enrollments";

const SEQUENCE_KEY: &str = "enrollmentsNextSeq";
const ENTITY: &str = "enrollment";
const ID_PREFIX: &str = "ENR";

/// Caller-supplied enrollment fields; ids are always generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub provider_id: String,
    pub payer_id: String,
    pub application_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    pub status: String,
    pub notes: String,
}

/// Display join of an enrollment with its partner names resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSummary {
    pub enrollment: Enrollment,
    pub provider_name: String,
    pub payer_name: String,
}

pub struct EnrollmentRepository {
    collection: PersistedCollection<Enrollment>,
    sequence: PersistedSequence,
}

impl EnrollmentRepository {
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let collection =
            PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::enrollments)?;
        let sequence =
            PersistedSequence::open(store, SEQUENCE_KEY, next_sequence(collection.records()))?;
        Ok(Self {
            collection,
            sequence,
        })
    }

    /// All enrollments in insertion order
    pub fn list(&self) -> &[Enrollment] {
        self.collection.records()
    }

    pub fn get(&self, id: &str) -> Option<&Enrollment> {
        self.collection.records().iter().find(|e| e.id == id)
    }

    pub fn create(&mut self, draft: EnrollmentDraft) -> CredoResult<Enrollment> {
        let enrollment = Enrollment {
            id: self.generate_id()?,
            provider_id: draft.provider_id,
            payer_id: draft.payer_id,
            application_date: draft.application_date,
            effective_date: draft.effective_date,
            status: draft.status,
            notes: draft.notes,
        };

        self.collection.push(enrollment.clone())?;
        log::info!("created enrollment {}", enrollment.id);
        Ok(enrollment)
    }

    pub fn update(&mut self, id: &str, draft: EnrollmentDraft) -> CredoResult<Enrollment> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        let enrollment = Enrollment {
            id: id.to_string(),
            provider_id: draft.provider_id,
            payer_id: draft.payer_id,
            application_date: draft.application_date,
            effective_date: draft.effective_date,
            status: draft.status,
            notes: draft.notes,
        };

        self.collection.replace(position, enrollment.clone())?;
        log::info!("updated enrollment {}", enrollment.id);
        Ok(enrollment)
    }

    pub fn delete(&mut self, id: &str) -> CredoResult<()> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        self.collection.remove(position)?;
        log::info!("deleted enrollment {}", id);
        Ok(())
    }

    pub fn resolve_provider<'a>(
        &self,
        enrollment: &Enrollment,
        providers: &'a ProviderRepository,
    ) -> Option<&'a Provider> {
        providers.get(&enrollment.provider_id)
    }

    pub fn resolve_payer<'a>(
        &self,
        enrollment: &Enrollment,
        payers: &'a PayerRepository,
    ) -> Option<&'a Payer> {
        payers.get(&enrollment.payer_id)
    }

    /// Join every enrollment with its partner names for display; dangling
    /// references fall back to sentinel names instead of failing
    pub fn summaries(
        &self,
        providers: &ProviderRepository,
        payers: &PayerRepository,
    ) -> Vec<EnrollmentSummary> {
        self.collection
            .records()
            .iter()
            .map(|enrollment| EnrollmentSummary {
                provider_name: self
                    .resolve_provider(enrollment, providers)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "Unknown Provider".to_string()),
                payer_name: self
                    .resolve_payer(enrollment, payers)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "Unknown Payer".to_string()),
                enrollment: enrollment.clone(),
            })
            .collect()
    }

    fn generate_id(&mut self) -> CredoResult<String> {
        let seq = self.sequence.advance()?;
        Ok(format!("{}-{:03}", ID_PREFIX, seq))
    }
}

fn id_sequence(id: &str) -> Option<u64> {
    id.rsplit('-').next()?.parse().ok()
}

fn next_sequence(records: &[Enrollment]) -> u64 {
    records
        .iter()
        .filter_map(|e| id_sequence(&e.id))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
