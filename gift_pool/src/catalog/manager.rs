//! Catalog manager: stock bookkeeping over the abstract store.

use std::sync::Arc;

use crate::db::{ClaimRepository, GiftRepository, IncrementOutcome, StoreError};

use super::errors::{CatalogError, CatalogResult};
use super::models::GiftType;
use super::seed::{GiftSeed, validate_seed};

/// Catalog manager
#[derive(Clone)]
pub struct CatalogManager {
    gifts: Arc<dyn GiftRepository>,
    claims: Arc<dyn ClaimRepository>,
}

impl CatalogManager {
    /// Create a new catalog manager
    ///
    /// The claim repository is needed only by [`CatalogManager::reset`], which
    /// wipes the ledger together with the gift set.
    pub fn new(gifts: Arc<dyn GiftRepository>, claims: Arc<dyn ClaimRepository>) -> Self {
        Self { gifts, claims }
    }

    /// All gift types in natural listing order
    pub async fn list_gifts(&self) -> CatalogResult<Vec<GiftType>> {
        Ok(self.gifts.fetch_all().await?)
    }

    /// Gift types with at least one unit of stock remaining, in natural order
    pub async fn list_available(&self) -> CatalogResult<Vec<GiftType>> {
        let gifts = self.gifts.fetch_all().await?;
        Ok(gifts.into_iter().filter(GiftType::is_available).collect())
    }

    /// Guarded atomic increment of a gift's claimed count.
    ///
    /// Returns the claimed count after the write. Fails with
    /// [`CatalogError::SoldOut`] when the gift was at capacity at the moment
    /// of the write; under concurrent contention this is how a losing
    /// allocation attempt learns to retry.
    pub async fn increment_claimed(&self, gift_id: &str) -> CatalogResult<u32> {
        match self.gifts.try_increment_claimed(gift_id).await {
            Ok(IncrementOutcome::Applied { claimed_count }) => Ok(claimed_count),
            Ok(IncrementOutcome::SoldOut) => Err(CatalogError::SoldOut(gift_id.to_string())),
            Err(StoreError::GiftNotFound(id)) => Err(CatalogError::GiftNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic decrement of a gift's claimed count, floored at zero
    pub async fn decrement_claimed(&self, gift_id: &str) -> CatalogResult<()> {
        match self.gifts.decrement_claimed(gift_id).await {
            Ok(()) => Ok(()),
            Err(StoreError::GiftNotFound(id)) => Err(CatalogError::GiftNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the entire catalog with the seed list and clear the claim
    /// ledger.
    ///
    /// Claims are wiped first so no record ever references a gift at a stale
    /// count. The sequence is not transactional across the two stores: a
    /// failure partway through leaves an indeterminate state, and the caller
    /// must report the error rather than assume a rollback happened.
    pub async fn reset(&self, seed: &[GiftSeed]) -> CatalogResult<()> {
        validate_seed(seed)?;

        log::info!("resetting catalog with {} gift type(s)", seed.len());
        self.claims.delete_all().await?;
        self.gifts.replace_all(seed).await?;
        log::info!("catalog reset complete");
        Ok(())
    }
}
