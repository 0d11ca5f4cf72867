//! Allocation engine: claim commit and reversal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::catalog::{CatalogError, CatalogManager, GiftId};
use crate::ledger::{ClaimLedger, LedgerError};

use super::draw::draw;
use super::errors::{AllocationError, AllocationResult};
use super::models::ClaimOutcome;

/// Additional attempts after the first lost compare-and-increment race
const MAX_CONTENTION_RETRIES: u32 = 3;

/// Allocation engine
///
/// Orchestrates the catalog and ledger into the claim flow: pre-check the
/// ledger, weighted draw over the available set, guarded stock increment,
/// ledger write. Claims for the same identity are serialized through a
/// per-identity mutex so the check-then-record sequence cannot race with
/// itself; independent claimants never contend on it.
#[derive(Clone)]
pub struct Allocator {
    catalog: Arc<CatalogManager>,
    ledger: Arc<ClaimLedger>,
    identity_locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl Allocator {
    /// Create a new allocator
    pub fn new(catalog: Arc<CatalogManager>, ledger: Arc<ClaimLedger>) -> Self {
        Self {
            catalog,
            ledger,
            identity_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Attempt to claim a gift for the given identity.
    ///
    /// Identity is trimmed and matched exactly (case-sensitive). The three
    /// `Ok` outcomes — awarded, exhausted, already claimed — are all normal
    /// business results; see [`AllocationError`] for the failure modes.
    pub async fn attempt_claim(&self, identity: &str) -> AllocationResult<ClaimOutcome> {
        let name = identity.trim();
        if name.is_empty() {
            return Err(AllocationError::EmptyIdentity);
        }

        let lock = self.identity_lock(name);
        let _held = lock.lock().await;

        if let Some(existing) = self.ledger.find_claim(name).await? {
            return Ok(ClaimOutcome::AlreadyClaimed { existing });
        }

        let mut attempts = 0;
        let gift = loop {
            let candidates = self.catalog.list_available().await?;
            let Some(chosen) = draw(&candidates) else {
                return Ok(ClaimOutcome::Exhausted);
            };

            match self.catalog.increment_claimed(&chosen.id).await {
                Ok(claimed_count) => {
                    let mut gift = chosen.clone();
                    gift.claimed_count = claimed_count;
                    break gift;
                }
                Err(CatalogError::SoldOut(id)) => {
                    // Lost the compare-and-increment race; refresh and retry
                    attempts += 1;
                    log::debug!("gift {id} sold out under contention, attempt {attempts}");
                    if attempts > MAX_CONTENTION_RETRIES {
                        return Err(AllocationError::Contention { attempts });
                    }
                }
                Err(e) => return Err(e.into()),
            }
        };

        match self.ledger.record_claim(name, &gift).await {
            Ok(record) => Ok(ClaimOutcome::Awarded { gift, record }),
            Err(LedgerError::DuplicateClaimant(_)) => {
                // Storage-level uniqueness backstop fired; give the stock
                // unit back and report the existing claim
                self.compensate(&gift.id, "duplicate claimant").await?;
                match self.ledger.find_claim(name).await? {
                    Some(existing) => Ok(ClaimOutcome::AlreadyClaimed { existing }),
                    None => Err(AllocationError::Contention { attempts: attempts + 1 }),
                }
            }
            Err(err) => {
                // Stock is consumed with no record; decrement it back or
                // escalate to a consistency fault
                match self.catalog.decrement_claimed(&gift.id).await {
                    Ok(()) => {
                        log::warn!(
                            "ledger write failed for '{name}', compensated gift {}: {err}",
                            gift.id
                        );
                        Err(err.into())
                    }
                    Err(comp_err) => {
                        log::error!(
                            "CONSISTENCY FAULT: gift {} stock consumed, ledger write and \
                             compensation both failed",
                            gift.id
                        );
                        Err(AllocationError::ConsistencyFault {
                            gift_id: gift.id,
                            ledger: err.to_string(),
                            compensation: comp_err.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Reverse a claim: delete the ledger record and restore one unit of
    /// stock to the referenced gift. Returns the affected gift id.
    pub async fn release_claim(&self, claim_id: Uuid) -> AllocationResult<GiftId> {
        let gift_id = self.ledger.remove_claim(claim_id).await?;

        match self.catalog.decrement_claimed(&gift_id).await {
            Ok(()) => {}
            Err(CatalogError::GiftNotFound(_)) => {
                // The record referenced a gift that has since been reseeded
                // away; the claim itself is gone, so there is nothing to
                // restore
                log::warn!("released claim {claim_id} referenced missing gift {gift_id}");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(gift_id)
    }

    fn identity_lock(&self, name: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.identity_locks.lock().unwrap();
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    async fn compensate(&self, gift_id: &str, reason: &str) -> AllocationResult<()> {
        match self.catalog.decrement_claimed(gift_id).await {
            Ok(()) => {
                log::debug!("compensated increment on gift {gift_id} ({reason})");
                Ok(())
            }
            Err(comp_err) => Err(AllocationError::ConsistencyFault {
                gift_id: gift_id.to_string(),
                ledger: reason.to_string(),
                compensation: comp_err.to_string(),
            }),
        }
    }
}
