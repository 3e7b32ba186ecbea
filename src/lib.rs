//! Record-management core for issued credentials and provider-network
//! enrollment
//!
//! The crate owns the data layer of the system: six persisted collections
//! (users, credentials, providers, locations, payers, enrollments) behind
//! typed repositories, a session gate over the user directory, and the open
//! credential verification lookup. Rendering and input collection belong to
//! the embedding display layer.
//!
//! ```no_run
//! use credo::{RepositoryManager, VerificationOutcome};
//!
//! # fn main() -> credo::CredoResult<()> {
//! let mut manager = RepositoryManager::open_file("credo-store.json")?;
//! let user = manager.session_mut().authenticate("issuer@demo.com", "demo123")?;
//! let visible = manager.credentials().list_for(&user);
//! println!("{} credentials", visible.len());
//!
//! match manager.credentials().verify("CRED-2024-001") {
//!     VerificationOutcome::Found { credential, is_valid } => {
//!         println!("{}: valid = {}", credential.name, is_valid);
//!     }
//!     other => println!("{:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod collection;
pub mod error;
pub mod manager;
pub mod password;
pub mod records;
pub mod repository;
pub mod seed;
pub mod sequence;
pub mod store;

// Re-export main types
pub use auth::{Registration, SessionGate};
pub use error::{CredoError, CredoResult};
pub use manager::RepositoryManager;
pub use records::{
    format_display_date, Credential, Enrollment, Location, Payer, Provider, Role, User,
};
pub use repository::{
    CredentialDraft, CredentialRepository, EnrollmentDraft, EnrollmentRepository,
    EnrollmentSummary, LocationDraft, LocationRepository, PayerDraft, PayerRepository,
    ProviderDraft, ProviderRepository, RecipientSummary, VerificationOutcome,
};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
