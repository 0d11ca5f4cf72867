//! Integration tests for the allocation flow over the in-memory store.
//!
//! Covers the claim state machine, pool exhaustion, weighted fairness, and
//! the administrative reset.

use std::sync::Arc;

use gift_pool::allocator::{AllocationError, Allocator, ClaimOutcome};
use gift_pool::catalog::{CatalogManager, GiftSeed};
use gift_pool::db::MemoryStore;
use gift_pool::ledger::ClaimLedger;

fn seed(entries: &[(&str, f64, u32)]) -> Vec<GiftSeed> {
    entries
        .iter()
        .map(|&(id, weight, total_stock)| GiftSeed {
            id: id.to_string(),
            name: format!("Gift {id}"),
            weight,
            total_stock,
            image_url: None,
        })
        .collect()
}

fn setup(entries: &[(&str, f64, u32)]) -> (Arc<CatalogManager>, Arc<ClaimLedger>, Allocator) {
    let store = Arc::new(MemoryStore::with_seed(&seed(entries)));
    let catalog = Arc::new(CatalogManager::new(store.clone(), store.clone()));
    let ledger = Arc::new(ClaimLedger::new(store));
    let allocator = Allocator::new(catalog.clone(), ledger.clone());
    (catalog, ledger, allocator)
}

#[tokio::test]
async fn test_successful_claim_awards_and_records() {
    let (catalog, ledger, allocator) = setup(&[("bear", 1.0, 5)]);

    let outcome = allocator.attempt_claim("Alice").await.unwrap();
    let ClaimOutcome::Awarded { gift, record } = outcome else {
        panic!("Expected an award, got {outcome:?}");
    };

    assert_eq!(gift.id, "bear");
    assert_eq!(gift.claimed_count, 1);
    assert_eq!(record.claimant_name, "Alice");
    assert_eq!(record.gift_id, "bear");

    let gifts = catalog.list_gifts().await.unwrap();
    assert_eq!(gifts[0].claimed_count, 1);

    let claims = ledger.list_claims().await.unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].id, record.id);
}

#[tokio::test]
async fn test_empty_identity_rejected_before_storage() {
    let (catalog, ledger, allocator) = setup(&[("bear", 1.0, 5)]);

    for identity in ["", "   ", "\t\n"] {
        let err = allocator.attempt_claim(identity).await.unwrap_err();
        assert!(matches!(err, AllocationError::EmptyIdentity));
    }

    assert_eq!(catalog.list_gifts().await.unwrap()[0].claimed_count, 0);
    assert!(ledger.list_claims().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_identity_is_trimmed_for_uniqueness() {
    let (_, _, allocator) = setup(&[("bear", 1.0, 5)]);

    allocator.attempt_claim("Alice").await.unwrap();
    let outcome = allocator.attempt_claim("  Alice  ").await.unwrap();
    assert!(matches!(outcome, ClaimOutcome::AlreadyClaimed { .. }));

    // Case matters: a different capitalization is a different identity
    let outcome = allocator.attempt_claim("alice").await.unwrap();
    assert!(matches!(outcome, ClaimOutcome::Awarded { .. }));
}

#[tokio::test]
async fn test_second_claim_rejected_without_stock_change() {
    let (catalog, _, allocator) = setup(&[("bear", 1.0, 5)]);

    let first = allocator.attempt_claim("Alice").await.unwrap();
    assert!(matches!(first, ClaimOutcome::Awarded { .. }));

    let second = allocator.attempt_claim("Alice").await.unwrap();
    let ClaimOutcome::AlreadyClaimed { existing } = second else {
        panic!("Expected rejection, got {second:?}");
    };
    assert_eq!(existing.claimant_name, "Alice");

    assert_eq!(catalog.list_gifts().await.unwrap()[0].claimed_count, 1);
}

#[tokio::test]
async fn test_exhausted_pool_is_a_normal_outcome() {
    let (catalog, ledger, allocator) = setup(&[("bear", 1.0, 1)]);

    assert!(matches!(
        allocator.attempt_claim("Alice").await.unwrap(),
        ClaimOutcome::Awarded { .. }
    ));
    assert!(matches!(
        allocator.attempt_claim("Bob").await.unwrap(),
        ClaimOutcome::Exhausted
    ));

    // The failed attempt left no trace
    assert_eq!(catalog.list_gifts().await.unwrap()[0].claimed_count, 1);
    assert_eq!(ledger.list_claims().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sold_out_gift_never_awarded() {
    // "mug" has heavy weight but zero remaining stock; it stays in the raw
    // catalog list yet must never be selected
    let (_, _, allocator) = setup(&[("bear", 1.0, 50), ("mug", 1000.0, 0)]);

    for i in 0..50 {
        let outcome = allocator.attempt_claim(&format!("visitor-{i}")).await.unwrap();
        let ClaimOutcome::Awarded { gift, .. } = outcome else {
            panic!("Pool should not be exhausted yet");
        };
        assert_eq!(gift.id, "bear");
    }
}

#[tokio::test]
async fn test_weighted_fairness_over_many_claims() {
    // Weight 3 vs 1 with ample stock: awards should split roughly 3:1
    let (_, ledger, allocator) = setup(&[("a", 1.0, 2000), ("b", 3.0, 2000)]);

    let trials = 1200;
    for i in 0..trials {
        let outcome = allocator.attempt_claim(&format!("visitor-{i}")).await.unwrap();
        assert!(matches!(outcome, ClaimOutcome::Awarded { .. }));
    }

    let claims = ledger.list_claims().await.unwrap();
    let b_share = claims.iter().filter(|c| c.gift_id == "b").count() as f64 / trials as f64;

    // Expected 0.75; four standard deviations is about 0.05 at this size
    assert!(
        (b_share - 0.75).abs() < 0.06,
        "B share {b_share} strayed too far from 0.75"
    );
}

#[tokio::test]
async fn test_conservation_across_mixed_operations() {
    let (catalog, ledger, allocator) = setup(&[("a", 1.0, 3), ("b", 2.0, 2)]);

    let mut awarded_ids = Vec::new();
    for i in 0..5 {
        match allocator.attempt_claim(&format!("visitor-{i}")).await.unwrap() {
            ClaimOutcome::Awarded { record, .. } => awarded_ids.push(record.id),
            other => panic!("Stock of 5 should cover 5 claimants, got {other:?}"),
        }
    }

    // Pool is fully claimed now
    assert!(matches!(
        allocator.attempt_claim("late-visitor").await.unwrap(),
        ClaimOutcome::Exhausted
    ));

    // Release two claims, then invariants must still hold
    allocator.release_claim(awarded_ids[0]).await.unwrap();
    allocator.release_claim(awarded_ids[1]).await.unwrap();

    let gifts = catalog.list_gifts().await.unwrap();
    let claims = ledger.list_claims().await.unwrap();
    for gift in &gifts {
        assert!(gift.claimed_count <= gift.total_stock);
        let referencing = claims.iter().filter(|c| c.gift_id == gift.id).count();
        assert_eq!(
            gift.claimed_count as usize, referencing,
            "claimed_count of {} must match its ledger records",
            gift.id
        );
    }
}

#[tokio::test]
async fn test_reset_zeroes_stock_and_clears_ledger() {
    let (catalog, ledger, allocator) = setup(&[("bear", 1.0, 3)]);

    allocator.attempt_claim("Alice").await.unwrap();
    allocator.attempt_claim("Bob").await.unwrap();

    let new_seed = seed(&[("bear", 1.0, 3), ("mug", 2.0, 4)]);
    catalog.reset(&new_seed).await.unwrap();

    let gifts = catalog.list_gifts().await.unwrap();
    assert_eq!(gifts.len(), 2);
    assert!(gifts.iter().all(|g| g.claimed_count == 0));
    assert!(ledger.list_claims().await.unwrap().is_empty());

    // Previously-claimed identities may claim again after a reset
    assert!(matches!(
        allocator.attempt_claim("Alice").await.unwrap(),
        ClaimOutcome::Awarded { .. }
    ));
}

#[tokio::test]
async fn test_reset_rejects_invalid_seed() {
    let (catalog, _, allocator) = setup(&[("bear", 1.0, 3)]);
    allocator.attempt_claim("Alice").await.unwrap();

    let bad_seed = seed(&[("bear", -1.0, 3)]);
    assert!(catalog.reset(&bad_seed).await.is_err());

    // Validation happens before any wipe; existing state is untouched
    assert_eq!(catalog.list_gifts().await.unwrap()[0].claimed_count, 1);
}
