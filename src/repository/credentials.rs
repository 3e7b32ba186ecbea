//! Credential repository
//!
//! Issuer-scoped create/update/delete, role-filtered listing, and the open
//! verification lookup. Issuer attribution is never caller-supplied: it is
//! always derived from the acting user.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::records::{Credential, Role, User};
use crate::seed;
use crate::sequence::PersistedSequence;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "credentials";

/// Store slot holding the id counter
const SEQUENCE_KEY: &str = "credentialsNextSeq";

const ENTITY: &str = "credential";

/// Caller-supplied credential fields
///
/// There is no issuer field here: `issuer` and `issuerId` are filled in
/// from the acting user on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDraft {
    /// Explicit id for imports; generated when absent. Ignored on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub recipient: String,
    pub recipient_email: String,
    pub issue_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
}

/// Outcome of a verification lookup
///
/// Verification is a read-only existence-and-status check open to any
/// caller, so none of these outcomes are errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationOutcome {
    /// The input was blank after trimming
    EmptyInput,
    /// No credential carries this id
    NotFound { id: String },
    /// The credential exists; valid only while its status is "Active"
    #[serde(rename_all = "camelCase")]
    Found {
        credential: Credential,
        is_valid: bool,
    },
}

/// One row of the issuer's recipients view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSummary {
    pub name: String,
    pub email: String,
    pub total_count: usize,
    pub active_count: usize,
}

pub struct CredentialRepository {
    collection: PersistedCollection<Credential>,
    sequence: PersistedSequence,
}

impl CredentialRepository {
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let collection =
            PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::credentials)?;
        let sequence =
            PersistedSequence::open(store, SEQUENCE_KEY, next_sequence(collection.records()))?;
        Ok(Self {
            collection,
            sequence,
        })
    }

    /// Credentials visible to `user`: issuers see what they issued,
    /// recipients see what was issued to their email. Insertion order.
    pub fn list_for(&self, user: &User) -> Vec<&Credential> {
        self.collection
            .records()
            .iter()
            .filter(|c| match user.role {
                Role::Issuer => c.issuer_id == user.id,
                Role::Recipient => c.recipient_email == user.email,
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Credential> {
        self.collection.records().iter().find(|c| c.id == id)
    }

    /// Issue a new credential as `acting_user`
    pub fn create(
        &mut self,
        draft: CredentialDraft,
        acting_user: &User,
    ) -> CredoResult<Credential> {
        if acting_user.role != Role::Issuer {
            return Err(CredoError::IssuerRoleRequired);
        }

        let id = match draft.id {
            Some(id) => {
                if self.get(&id).is_some() {
                    return Err(CredoError::DuplicateId(id));
                }
                // Advance the counter past any numeric suffix so generated
                // ids can never land on a caller-supplied one
                if let Some(seq) = id_sequence(&id) {
                    self.sequence.advance_past(seq)?;
                }
                id
            }
            None => self.generate_id()?,
        };

        let credential = Credential {
            id,
            name: draft.name,
            credential_type: draft.credential_type,
            recipient: draft.recipient,
            recipient_email: draft.recipient_email,
            issuer: issuer_display(acting_user),
            issuer_id: acting_user.id.clone(),
            issue_date: draft.issue_date,
            expiry_date: draft.expiry_date,
            status: draft.status,
        };

        self.collection.push(credential.clone())?;
        log::info!(
            "issued credential {} to {}",
            credential.id,
            credential.recipient_email
        );
        Ok(credential)
    }

    /// Replace the credential carrying `id`; the id itself never changes
    pub fn update(
        &mut self,
        id: &str,
        draft: CredentialDraft,
        acting_user: &User,
    ) -> CredoResult<Credential> {
        if acting_user.role != Role::Issuer {
            return Err(CredoError::IssuerRoleRequired);
        }

        let position = self
            .collection
            .records()
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        let credential = Credential {
            id: id.to_string(),
            name: draft.name,
            credential_type: draft.credential_type,
            recipient: draft.recipient,
            recipient_email: draft.recipient_email,
            issuer: issuer_display(acting_user),
            issuer_id: acting_user.id.clone(),
            issue_date: draft.issue_date,
            expiry_date: draft.expiry_date,
            status: draft.status,
        };

        self.collection.replace(position, credential.clone())?;
        log::info!("updated credential {}", credential.id);
        Ok(credential)
    }

    pub fn delete(&mut self, id: &str) -> CredoResult<()> {
        let position = self
            .collection
            .records()
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CredoError::NotFound {
                entity: ENTITY,
                id: id.to_string(),
            })?;

        self.collection.remove(position)?;
        log::info!("deleted credential {}", id);
        Ok(())
    }

    /// Check a credential id as presented by any caller, session or not
    pub fn verify(&self, input: &str) -> VerificationOutcome {
        let id = input.trim();
        if id.is_empty() {
            return VerificationOutcome::EmptyInput;
        }
        match self.get(id) {
            Some(credential) => VerificationOutcome::Found {
                is_valid: credential.is_active(),
                credential: credential.clone(),
            },
            None => VerificationOutcome::NotFound { id: id.to_string() },
        }
    }

    /// Group the acting issuer's credentials by recipient email, first-seen
    /// order, first-seen name winning when the same email reappears
    pub fn recipients(&self, acting_user: &User) -> CredoResult<Vec<RecipientSummary>> {
        if acting_user.role != Role::Issuer {
            return Err(CredoError::IssuerRoleRequired);
        }

        let mut summaries: Vec<RecipientSummary> = Vec::new();
        for credential in self
            .collection
            .records()
            .iter()
            .filter(|c| c.issuer_id == acting_user.id)
        {
            let active = if credential.is_active() { 1 } else { 0 };
            match summaries
                .iter_mut()
                .find(|s| s.email == credential.recipient_email)
            {
                Some(summary) => {
                    summary.total_count += 1;
                    summary.active_count += active;
                }
                None => summaries.push(RecipientSummary {
                    name: credential.recipient.clone(),
                    email: credential.recipient_email.clone(),
                    total_count: 1,
                    active_count: active,
                }),
            }
        }
        Ok(summaries)
    }

    fn generate_id(&mut self) -> CredoResult<String> {
        let seq = self.sequence.advance()?;
        Ok(format!("CRED-{}-{:04}", Utc::now().year(), seq))
    }
}

/// Stored issuer name: the acting user's organization, their personal name
/// when no organization is set
fn issuer_display(user: &User) -> String {
    if user.organization.is_empty() {
        user.name.clone()
    } else {
        user.organization.clone()
    }
}

fn id_sequence(id: &str) -> Option<u64> {
    id.rsplit('-').next()?.parse().ok()
}

/// Counter floor: past every existing numeric suffix, and never below 1000
/// so generated ids keep the historical four-digit shape
fn next_sequence(records: &[Credential]) -> u64 {
    let max_suffix = records
        .iter()
        .filter_map(|c| id_sequence(&c.id))
        .max()
        .unwrap_or(0);
    max_suffix.max(999).saturating_add(1)
}
