//! Claim ledger data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{GiftId, GiftType};

/// One completed claim: a binding of claimant identity to awarded gift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: Uuid,
    /// Uniqueness key: exact string equality after trimming, case-sensitive
    pub claimant_name: String,
    /// Lookup key into the catalog, not an ownership relation
    pub gift_id: GiftId,
    /// Denormalized for display; the catalog row may be reseeded later
    pub gift_name: String,
    pub claimed_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Build a fresh record for an awarded gift, stamped with the current time
    pub fn new(claimant_name: &str, gift: &GiftType) -> Self {
        Self {
            id: Uuid::new_v4(),
            claimant_name: claimant_name.trim().to_string(),
            gift_id: gift.id.clone(),
            gift_name: gift.name.clone(),
            claimed_at: Utc::now(),
        }
    }
}
