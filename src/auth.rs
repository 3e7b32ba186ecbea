//! Session and authentication gate over the user directory
//!
//! Holds at most one current user. The session survives restarts through
//! the `currentUser` store slot and is restored at open.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::PersistedCollection;
use crate::error::{CredoError, CredoResult};
use crate::password::{hash_password, verify_password};
use crate::records::{Role, User};
use crate::seed;
use crate::store::KeyValueStore;

/// Collection key in the backing store
const COLLECTION_KEY: &str = "users";

/// Store slot holding the persisted session
const SESSION_KEY: &str = "currentUser";

/// A new-account request; the password arrives in plaintext and is hashed
/// before anything is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub organization: String,
}

pub struct SessionGate {
    users: PersistedCollection<User>,
    store: Arc<dyn KeyValueStore>,
    current: Option<User>,
}

impl SessionGate {
    /// Open the user directory and restore any persisted session
    ///
    /// An unreadable session slot is cleared and treated as logged out; it
    /// never blocks startup.
    pub fn open(store: Arc<dyn KeyValueStore>) -> CredoResult<Self> {
        let users = PersistedCollection::open(store.clone(), COLLECTION_KEY, seed::users)?;

        let current = match store.get(SESSION_KEY)? {
            Some(value) => match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    log::debug!("restored session for {}", user.email);
                    Some(user)
                }
                Err(e) => {
                    log::warn!("clearing unreadable session slot: {}", e);
                    store.remove(SESSION_KEY)?;
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            users,
            store,
            current,
        })
    }

    /// Log in with an exact, case-sensitive email and password match
    pub fn authenticate(&mut self, email: &str, password: &str) -> CredoResult<User> {
        let user = self
            .users
            .records()
            .iter()
            .find(|u| u.email == email && verify_password(password, &u.password))
            .cloned()
            .ok_or(CredoError::InvalidCredentials)?;

        self.establish(user.clone())?;
        Ok(user)
    }

    /// Create an account and log it in immediately
    pub fn register(&mut self, registration: Registration) -> CredoResult<User> {
        if self
            .users
            .records()
            .iter()
            .any(|u| u.email == registration.email)
        {
            return Err(CredoError::EmailAlreadyExists(registration.email));
        }

        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            name: registration.name,
            email: registration.email,
            password: hash_password(&registration.password),
            role: registration.role,
            organization: registration.organization,
        };

        self.users.push(user.clone())?;
        log::info!("registered {} with role {:?}", user.email, user.role);

        self.establish(user.clone())?;
        Ok(user)
    }

    /// Clear the session; the user directory is untouched
    pub fn logout(&mut self) -> CredoResult<()> {
        if let Some(user) = self.current.take() {
            log::info!("logged out {}", user.email);
        }
        self.store.remove(SESSION_KEY)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn establish(&mut self, user: User) -> CredoResult<()> {
        self.store.set(SESSION_KEY, serde_json::to_value(&user)?)?;
        log::info!("session established for {}", user.email);
        self.current = Some(user);
        Ok(())
    }
}
