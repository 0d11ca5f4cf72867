//! Catalog error types.

use thiserror::Error;

use crate::db::StoreError;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Gift type does not exist
    #[error("Gift not found: {0}")]
    GiftNotFound(String),

    /// Guarded increment rejected because the gift is at capacity
    #[error("Gift sold out: {0}")]
    SoldOut(String),

    /// Seed definition failed validation
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}

impl CatalogError {
    /// Get a client-safe error message that doesn't leak storage detail
    pub fn client_message(&self) -> String {
        match self {
            CatalogError::Store(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
