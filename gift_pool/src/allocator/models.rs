//! Allocation outcome types.

use serde::Serialize;

use crate::catalog::GiftType;
use crate::ledger::ClaimRecord;

/// Result of a claim attempt. All three variants are normal outcomes, not
/// errors: an empty pool and a repeat claimant are expected business results.
#[derive(Debug, Clone, Serialize)]
pub enum ClaimOutcome {
    /// A gift was awarded and recorded
    Awarded {
        /// The awarded gift, with `claimed_count` as of the commit
        gift: GiftType,
        record: ClaimRecord,
    },
    /// Every gift type is out of stock
    Exhausted,
    /// This claimant already holds a claim; no stock was touched
    AlreadyClaimed { existing: ClaimRecord },
}
