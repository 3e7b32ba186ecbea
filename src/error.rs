use thiserror::Error;

/// Central error type for the credo record-management core
#[derive(Error, Debug)]
pub enum CredoError {
    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("This operation requires the issuer role")]
    IssuerRoleRequired,

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("A record with this id already exists: {0}")]
    DuplicateId(String),

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Failed to save to storage: {0}")]
    StorageSaveFailed(String),

    #[error("Failed to load from storage: {0}")]
    StorageLoadFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutex lock error")]
    LockError,
}

// Implement conversion from PoisonError for Mutex locks
impl<T> From<std::sync::PoisonError<T>> for CredoError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CredoError::LockError
    }
}

// Implement conversion to String for host bindings
impl From<CredoError> for String {
    fn from(error: CredoError) -> Self {
        error.to_string()
    }
}

// Helper type alias for Results
pub type CredoResult<T> = Result<T, CredoError>;
