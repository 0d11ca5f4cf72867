//! # Gift Pool
//!
//! A weighted prize allocation engine for one-claim-per-visitor giveaways.
//!
//! Each distinct visitor may claim exactly one randomly selected gift from a
//! finite pool of gift types. Every gift type carries a selection weight and a
//! fixed stock; the allocation engine performs a weighted random draw over the
//! currently available types and commits the result with a guarded atomic
//! stock increment, so stock is never oversold even under concurrent claims.
//!
//! ## Core Modules
//!
//! - [`catalog`]: Gift types, seed definitions, and stock bookkeeping
//! - [`allocator`]: Weighted draw and the claim commit/compensation flow
//! - [`ledger`]: Claim records and one-claim-per-identity enforcement
//! - [`db`]: Storage contract plus in-memory and PostgreSQL backends
//!
//! ## Example
//!
//! ```
//! use gift_pool::allocator::{Allocator, ClaimOutcome};
//! use gift_pool::catalog::{CatalogManager, GiftSeed};
//! use gift_pool::db::MemoryStore;
//! use gift_pool::ledger::ClaimLedger;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let catalog = Arc::new(CatalogManager::new(store.clone(), store.clone()));
//!     let ledger = Arc::new(ClaimLedger::new(store.clone()));
//!
//!     let seed = vec![GiftSeed {
//!         id: "plush_bear".into(),
//!         name: "Plush Bear".into(),
//!         weight: 3.0,
//!         total_stock: 10,
//!         image_url: Some("/images/bear.png".into()),
//!     }];
//!     catalog.reset(&seed).await?;
//!
//!     let allocator = Allocator::new(catalog, ledger);
//!     match allocator.attempt_claim("Alice").await? {
//!         ClaimOutcome::Awarded { gift, .. } => println!("Alice won {}", gift.name),
//!         ClaimOutcome::Exhausted => println!("all gifts are gone"),
//!         ClaimOutcome::AlreadyClaimed { .. } => println!("Alice already claimed"),
//!     }
//!     Ok(())
//! }
//! ```

/// Weighted random selection and the allocation commit flow.
pub mod allocator;
pub use allocator::{AllocationError, AllocationResult, Allocator, ClaimOutcome};

/// Gift types, seed definitions, and stock bookkeeping.
pub mod catalog;
pub use catalog::{CatalogManager, GiftId, GiftSeed, GiftType};

/// Storage contract and backends.
pub mod db;
pub use db::{ClaimRepository, GiftRepository, MemoryStore, StoreError};

/// Claim records and per-identity uniqueness.
pub mod ledger;
pub use ledger::{ClaimLedger, ClaimRecord};
