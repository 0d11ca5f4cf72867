//! Repository trait definitions: the contract the core requires of storage.
//!
//! Any backend works — key-value store, relational table, document database —
//! as long as it provides per-record read/write/delete, an exact-match query
//! on the claimant name, and one non-negotiable primitive: a guarded atomic
//! increment on a gift's claimed count. The guard (`claimed_count <
//! total_stock` checked at write time) is what makes per-gift stock safety
//! possible without a global lock; an application-level read-then-write pair
//! is not an acceptable substitute.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{GiftId, GiftSeed, GiftType};
use crate::ledger::ClaimRecord;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Gift type does not exist
    #[error("gift not found: {0}")]
    GiftNotFound(String),

    /// Claim record does not exist
    #[error("claim not found: {0}")]
    ClaimNotFound(Uuid),

    /// Storage-level uniqueness constraint on the claimant name fired
    #[error("claimant already recorded: {0}")]
    DuplicateClaimant(String),

    /// The underlying store is unreachable or failed mid-operation
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// Backend-specific failure that is not a connectivity problem
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a guarded increment on a gift's claimed count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOutcome {
    /// The increment applied; carries the claimed count after the write
    Applied { claimed_count: u32 },
    /// The gift was already at capacity when the write was attempted
    SoldOut,
}

/// Trait for gift catalog storage operations
#[async_trait]
pub trait GiftRepository: Send + Sync {
    /// Fetch all gift types in natural (seed) order
    async fn fetch_all(&self) -> StoreResult<Vec<GiftType>>;

    /// Fetch a single gift type by id
    async fn fetch(&self, gift_id: &str) -> StoreResult<Option<GiftType>>;

    /// Atomically increment `claimed_count` by one, only if it is still below
    /// `total_stock` at the moment of the write
    async fn try_increment_claimed(&self, gift_id: &str) -> StoreResult<IncrementOutcome>;

    /// Atomically decrement `claimed_count` by one, floored at zero
    async fn decrement_claimed(&self, gift_id: &str) -> StoreResult<()>;

    /// Replace the entire gift set with the seed list, zeroing claimed counts
    async fn replace_all(&self, seed: &[GiftSeed]) -> StoreResult<()>;
}

/// Trait for claim ledger storage operations
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Fetch all claim records
    async fn fetch_all(&self) -> StoreResult<Vec<ClaimRecord>>;

    /// Find a claim record by exact claimant name match
    async fn find_by_claimant(&self, claimant_name: &str) -> StoreResult<Option<ClaimRecord>>;

    /// Insert a new claim record
    async fn insert(&self, record: &ClaimRecord) -> StoreResult<()>;

    /// Delete a claim record, returning the gift id it referenced
    async fn delete(&self, claim_id: Uuid) -> StoreResult<GiftId>;

    /// Delete all claim records
    async fn delete_all(&self) -> StoreResult<()>;
}
