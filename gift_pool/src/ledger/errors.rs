//! Claim ledger error types.

use thiserror::Error;
use uuid::Uuid;

use crate::db::StoreError;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Storage error
    #[error("Storage error: {0}")]
    Store(StoreError),

    /// Claim record does not exist
    #[error("Claim not found: {0}")]
    ClaimNotFound(Uuid),

    /// A record for this claimant already exists
    #[error("Claimant has already claimed: {0}")]
    DuplicateClaimant(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ClaimNotFound(id) => LedgerError::ClaimNotFound(id),
            StoreError::DuplicateClaimant(name) => LedgerError::DuplicateClaimant(name),
            other => LedgerError::Store(other),
        }
    }
}

impl LedgerError {
    /// Get a client-safe error message that doesn't leak storage detail
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Store(_) => "Internal server error".to_string(),
            LedgerError::ClaimNotFound(_) => "Claim not found".to_string(),
            LedgerError::DuplicateClaimant(_) => "You have already claimed a gift".to_string(),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
