//! Unified repository manager
//!
//! One manager per embedding process wires the session gate and the five
//! record repositories over a single shared store. There is no global
//! instance; embedders construct a manager and pass it where needed.

use std::path::Path;
use std::sync::Arc;

use crate::auth::SessionGate;
use crate::error::CredoResult;
use crate::repository::{
    CredentialRepository, EnrollmentRepository, LocationRepository, PayerRepository,
    ProviderRepository,
};
use crate::store::{JsonFileStore, KeyValueStore};

pub struct RepositoryManager {
    session: SessionGate,
    credentials: CredentialRepository,
    providers: ProviderRepository,
    locations: LocationRepository,
    payers: PayerRepository,
    enrollments: EnrollmentRepository,
}

impl RepositoryManager {
    /// Open every collection over one shared store, seeding absent ones
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        Ok(Self {
            session: SessionGate::open(store.clone())?,
            credentials: CredentialRepository::open(store.clone())?,
            providers: ProviderRepository::open(store.clone())?,
            locations: LocationRepository::open(store.clone())?,
            payers: PayerRepository::open(store.clone())?,
            enrollments: EnrollmentRepository::open(store)?,
        })
    }

    /// Open over a JSON file store at `path`
    pub fn open_file<P: AsRef<Path>>(path: P) -> CredoResult<Self> {
        let store = Arc::new(JsonFileStore::open(path)?);
        Self::open(store)
    }

    /// Get the session gate
    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionGate {
        &mut self.session
    }

    /// Get the credential repository
    pub fn credentials(&self) -> &CredentialRepository {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut CredentialRepository {
        &mut self.credentials
    }

    /// Get the provider repository
    pub fn providers(&self) -> &ProviderRepository {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut ProviderRepository {
        &mut self.providers
    }

    /// Get the location repository
    pub fn locations(&self) -> &LocationRepository {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationRepository {
        &mut self.locations
    }

    /// Get the payer repository
    pub fn payers(&self) -> &PayerRepository {
        &self.payers
    }

    pub fn payers_mut(&mut self) -> &mut PayerRepository {
        &mut self.payers
    }

    /// Get the enrollment repository
    pub fn enrollments(&self) -> &EnrollmentRepository {
        &self.enrollments
    }

    pub fn enrollments_mut(&mut self) -> &mut EnrollmentRepository {
        &mut self.enrollments
    }
}
