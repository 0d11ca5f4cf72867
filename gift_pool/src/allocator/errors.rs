//! Allocation error types.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::ledger::LedgerError;

/// Allocation errors
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Claimant identity is empty after trimming; storage was not touched
    #[error("Claimant name must not be empty")]
    EmptyIdentity,

    /// Every retry lost the compare-and-increment race; transient
    #[error("Allocation contention: lost the stock race {attempts} time(s)")]
    Contention { attempts: u32 },

    /// Stock was incremented, the ledger write failed, and the compensating
    /// decrement also failed. Not locally recoverable; an operator must
    /// reconcile the gift's claimed count against the ledger.
    #[error(
        "Consistency fault on gift {gift_id}: ledger write failed ({ledger}), \
         compensation failed ({compensation}); manual reconciliation required"
    )]
    ConsistencyFault {
        gift_id: String,
        ledger: String,
        compensation: String,
    },

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Ledger error
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AllocationError {
    /// Get a client-safe error message that doesn't leak storage detail
    pub fn client_message(&self) -> String {
        match self {
            AllocationError::EmptyIdentity => self.to_string(),
            AllocationError::Contention { .. } => {
                "The gift pool is busy, please try again".to_string()
            }
            AllocationError::ConsistencyFault { .. } => "Internal server error".to_string(),
            AllocationError::Catalog(e) => e.client_message(),
            AllocationError::Ledger(e) => e.client_message(),
        }
    }

    /// Whether the caller may simply retry the request
    pub fn is_transient(&self) -> bool {
        matches!(self, AllocationError::Contention { .. })
    }
}

/// Result type for allocation operations
pub type AllocationResult<T> = Result<T, AllocationError>;
