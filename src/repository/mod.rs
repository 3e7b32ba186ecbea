//! Record Repositories
//!
//! One repository per persisted collection. Each repository owns its
//! collection, filters in memory, and writes the whole collection back
//! through the shared store on every mutation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Repositories                    │
//! │  credentials │ providers │ locations │ ...   │
//! └──────────────────┬───────────────────────────┘
//!                    │
//!         ┌──────────▼──────────┐
//!         │ PersistedCollection │
//!         │ (load-or-seed/save) │
//!         └──────────┬──────────┘
//!                    │
//!         ┌──────────▼──────────┐
//!         │    KeyValueStore    │
//!         │  (file or memory)   │
//!         └─────────────────────┘
//! ```

pub mod credentials;
pub mod enrollments;
pub mod locations;
pub mod payers;
pub mod providers;

// Re-export main types
pub use credentials::{
    CredentialDraft, CredentialRepository, RecipientSummary, VerificationOutcome,
};
pub use enrollments::{EnrollmentDraft, EnrollmentRepository, EnrollmentSummary};
pub use locations::{LocationDraft, LocationRepository};
pub use payers::{PayerDraft, PayerRepository};
pub use providers::{ProviderDraft, ProviderRepository};
