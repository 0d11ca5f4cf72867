//! In-memory storage backend.
//!
//! Used by the test suite and local runs. All state sits behind a single
//! mutex, which makes the guarded increment trivially atomic; the lock is
//! never held across an await point.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::{GiftId, GiftSeed, GiftType};
use crate::ledger::ClaimRecord;

use super::repository::{
    ClaimRepository, GiftRepository, IncrementOutcome, StoreError, StoreResult,
};

#[derive(Default)]
struct MemoryInner {
    // Insertion order is the catalog's natural listing order
    gifts: Vec<GiftType>,
    claims: Vec<ClaimRecord>,
}

/// In-memory implementation of both repository traits
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a seed list
    pub fn with_seed(seed: &[GiftSeed]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.gifts = seed.iter().cloned().map(GiftSeed::into_gift).collect();
        }
        store
    }
}

#[async_trait]
impl GiftRepository for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<GiftType>> {
        Ok(self.inner.lock().unwrap().gifts.clone())
    }

    async fn fetch(&self, gift_id: &str) -> StoreResult<Option<GiftType>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.gifts.iter().find(|g| g.id == gift_id).cloned())
    }

    async fn try_increment_claimed(&self, gift_id: &str) -> StoreResult<IncrementOutcome> {
        let mut inner = self.inner.lock().unwrap();
        let gift = inner
            .gifts
            .iter_mut()
            .find(|g| g.id == gift_id)
            .ok_or_else(|| StoreError::GiftNotFound(gift_id.to_string()))?;

        if gift.claimed_count < gift.total_stock {
            gift.claimed_count += 1;
            Ok(IncrementOutcome::Applied {
                claimed_count: gift.claimed_count,
            })
        } else {
            Ok(IncrementOutcome::SoldOut)
        }
    }

    async fn decrement_claimed(&self, gift_id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let gift = inner
            .gifts
            .iter_mut()
            .find(|g| g.id == gift_id)
            .ok_or_else(|| StoreError::GiftNotFound(gift_id.to_string()))?;

        gift.claimed_count = gift.claimed_count.saturating_sub(1);
        Ok(())
    }

    async fn replace_all(&self, seed: &[GiftSeed]) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.gifts = seed.iter().cloned().map(GiftSeed::into_gift).collect();
        Ok(())
    }
}

#[async_trait]
impl ClaimRepository for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<ClaimRecord>> {
        Ok(self.inner.lock().unwrap().claims.clone())
    }

    async fn find_by_claimant(&self, claimant_name: &str) -> StoreResult<Option<ClaimRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .claims
            .iter()
            .find(|c| c.claimant_name == claimant_name)
            .cloned())
    }

    async fn insert(&self, record: &ClaimRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        // Backstop parity with the UNIQUE constraint in the Postgres schema
        if inner
            .claims
            .iter()
            .any(|c| c.claimant_name == record.claimant_name)
        {
            return Err(StoreError::DuplicateClaimant(record.claimant_name.clone()));
        }
        inner.claims.push(record.clone());
        Ok(())
    }

    async fn delete(&self, claim_id: Uuid) -> StoreResult<GiftId> {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .claims
            .iter()
            .position(|c| c.id == claim_id)
            .ok_or(StoreError::ClaimNotFound(claim_id))?;
        let record = inner.claims.remove(position);
        Ok(record.gift_id)
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.inner.lock().unwrap().claims.clear();
        Ok(())
    }
}
