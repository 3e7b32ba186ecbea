//! Provider repository

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::records::{Location, Provider};
use crate::repository::locations::LocationRepository;
use crate::seed;
use crate::sequence::PersistedSequence;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "providers";

const SEQUENCE_KEY: &str = "providersNextSeq";
const ENTITY: &str = "provider";
const ID_PREFIX: &str = "PROV";

/// Caller-supplied provider fields; ids are always generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDraft {
    pub name: String,
    pub npi: String,
    pub specialty: String,
    pub license: String,
    pub state: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub status: String,
}

pub struct ProviderRepository {
    collection: PersistedCollection<Provider>,
    sequence: PersistedSequence,
}

impl ProviderRepository {
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let collection = PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::providers)?;
        let sequence =
            PersistedSequence::open(store, SEQUENCE_KEY, next_sequence(collection.records()))?;
        Ok(Self {
            collection,
            sequence,
        })
    }

    /// All providers in insertion order
    pub fn list(&self) -> &[Provider] {
        self.collection.records()
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.collection.records().iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, draft: ProviderDraft) -> CredoResult<Provider> {
        let provider = Provider {
            id: self.generate_id()?,
            name: draft.name,
            npi: draft.npi,
            specialty: draft.specialty,
            license: draft.license,
            state: draft.state,
            email: draft.email,
            phone: draft.phone,
            location_id: draft.location_id,
            status: draft.status,
        };

        self.collection.push(provider.clone())?;
        log::info!("created provider {}", provider.id);
        Ok(provider)
    }

    pub fn update(&mut self, id: &str, draft: ProviderDraft) -> CredoResult<Provider> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        let provider = Provider {
            id: id.to_string(),
            name: draft.name,
            npi: draft.npi,
            specialty: draft.specialty,
            license: draft.license,
            state: draft.state,
            email: draft.email,
            phone: draft.phone,
            location_id: draft.location_id,
            status: draft.status,
        };

        self.collection.replace(position, provider.clone())?;
        log::info!("updated provider {}", provider.id);
        Ok(provider)
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
        log::info!("deleted provider {}", id);
        Ok(())
    }

    /// Follow a provider's location reference; dangling or absent
    /// references degrade to `None`, never an error
    pub fn resolve_location<'a>(
        &self,
        provider: &Provider,
        locations: &'a LocationRepository,
    ) -> Option<&'a Location> {
        provider
            .location_id
            .as_deref()
            .and_then(|id| locations.get(id))
    }

    fn generate_id(&mut self) -> CredoResult<String> {
        let seq = self.sequence.advance()?;
        Ok(format!("{}-{:03}", ID_PREFIX, seq))
    }
}

fn id_sequence(id: &str) -> Option<u64> {
    id.rsplit('-').next()?.parse().ok()
}

fn next_sequence(records: &[Provider]) -> u64 {
    records
        .iter()
        .filter_map(|p| id_sequence(&p.id))
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn open_repos() -> (ProviderRepository, LocationRepository) {
        let store = Arc::new(MemoryStore::new());
        let providers =
            ProviderRepository::open(store.clone() as Arc<dyn KeyValueStore>).unwrap();
        let locations = LocationRepository::open(store).unwrap();
        (providers, locations)
    }

    fn draft(name: &str, location_id: Option<&str>) -> ProviderDraft {
        ProviderDraft {
            name: name.to_string(),
            npi: "5555555555".to_string(),
            specialty: "Dermatology".to_string(),
            license: "TX-11111".to_string(),
            state: "TX".to_string(),
            email: "new.provider@example.com".to_string(),
            phone: "(555) 000-0000".to_string(),
            location_id: location_id.map(|s| s.to_string()),
            status: "Active".to_string(),
        }
    }

    #[test]
    fn test_create_continues_seeded_sequence() {
        let (mut providers, _) = open_repos();
        let created = providers.create(draft("Dr. New", None)).unwrap();
        assert_eq!(created.id, "PROV-003");
        assert_eq!(providers.list().len(), 3);
    }

    #[test]
    fn test_deleted_ids_are_never_reissued() {
        let (mut providers, _) = open_repos();
        providers.delete("PROV-002").unwrap();

        let created = providers.create(draft("Dr. After Delete", None)).unwrap();
        assert_eq!(created.id, "PROV-003");
    }

    #[test]
    fn test_deleted_max_id_is_not_reissued_after_reopen() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut providers =
                ProviderRepository::open(store.clone() as Arc<dyn KeyValueStore>).unwrap();
            providers.delete("PROV-002").unwrap();
        }

        let mut reopened = ProviderRepository::open(store as Arc<dyn KeyValueStore>).unwrap();
        let created = reopened.create(draft("Dr. After Reopen", None)).unwrap();
        assert_eq!(created.id, "PROV-003");
    }

    #[test]
    fn test_open_tolerates_huge_stored_suffix() {
        let store = Arc::new(MemoryStore::new());
        let legacy = Provider {
            id: "PROV-4294967295".to_string(),
            name: "Dr. Legacy".to_string(),
            npi: "5555555555".to_string(),
            specialty: "Dermatology".to_string(),
            license: "TX-11111".to_string(),
            state: "TX".to_string(),
            email: "legacy@example.com".to_string(),
            phone: "(555) 000-0000".to_string(),
            location_id: None,
            status: "Active".to_string(),
        };
        store
            .set(COLLECTION_KEY, serde_json::to_value(vec![legacy]).unwrap())
            .unwrap();

        let mut providers = ProviderRepository::open(store as Arc<dyn KeyValueStore>).unwrap();
        let created = providers.create(draft("Dr. Next", None)).unwrap();
        assert_eq!(created.id, "PROV-4294967296");
    }

    #[test]
    fn test_update_missing_provider_is_not_found() {
        let (mut providers, _) = open_repos();
        let result = providers.update("PROV-999", draft("Ghost", None));
        assert!(matches!(
            result,
            Err(CredoError::NotFound { entity: "provider", .. })
        ));
    }

    #[test]
    fn test_resolve_location_follows_reference() {
        let (providers, locations) = open_repos();
        let provider = providers.get("PROV-001").unwrap();

        let location = providers.resolve_location(provider, &locations).unwrap();
        assert_eq!(location.name, "Memorial Hospital - Main Campus");
    }

    #[test]
    fn test_resolve_location_degrades_on_dangling_reference() {
        let (mut providers, locations) = open_repos();
        let created = providers
            .create(draft("Dr. Dangling", Some("LOC-404")))
            .unwrap();

        assert!(providers.resolve_location(&created, &locations).is_none());

        let homeless = providers.create(draft("Dr. Homeless", None)).unwrap();
        assert!(providers.resolve_location(&homeless, &locations).is_none());
    }
}
