//! Claim ledger manager.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::{GiftId, GiftType};
use crate::db::ClaimRepository;

use super::errors::LedgerResult;
use super::models::ClaimRecord;

/// Claim ledger over the abstract claim store
#[derive(Clone)]
pub struct ClaimLedger {
    claims: Arc<dyn ClaimRepository>,
}

impl ClaimLedger {
    /// Create a new claim ledger
    pub fn new(claims: Arc<dyn ClaimRepository>) -> Self {
        Self { claims }
    }

    /// Whether a claim record exists for exactly this claimant name (trimmed)
    pub async fn has_claimed(&self, claimant_name: &str) -> LedgerResult<bool> {
        Ok(self.find_claim(claimant_name).await?.is_some())
    }

    /// Find the claim record for a claimant name (trimmed), if any
    pub async fn find_claim(&self, claimant_name: &str) -> LedgerResult<Option<ClaimRecord>> {
        Ok(self.claims.find_by_claimant(claimant_name.trim()).await?)
    }

    /// Record a completed claim. The caller must already have confirmed the
    /// claimant has no prior record and performed the catalog increment; this
    /// write is the last step of a successful allocation.
    pub async fn record_claim(
        &self,
        claimant_name: &str,
        gift: &GiftType,
    ) -> LedgerResult<ClaimRecord> {
        let record = ClaimRecord::new(claimant_name, gift);
        self.claims.insert(&record).await?;
        log::info!(
            "recorded claim {} for '{}' -> gift {}",
            record.id,
            record.claimant_name,
            record.gift_id
        );
        Ok(record)
    }

    /// Delete a claim record, returning the gift id it referenced so the
    /// caller can restore one unit of stock. Unknown ids fail with
    /// `ClaimNotFound` and mutate nothing.
    pub async fn remove_claim(&self, claim_id: Uuid) -> LedgerResult<GiftId> {
        let gift_id = self.claims.delete(claim_id).await?;
        log::info!("removed claim {claim_id} (gift {gift_id})");
        Ok(gift_id)
    }

    /// All claim records
    pub async fn list_claims(&self) -> LedgerResult<Vec<ClaimRecord>> {
        Ok(self.claims.fetch_all().await?)
    }
}
