//! Allocator module: the weighted draw and the claim commit flow.
//!
//! This is the part of the system with real invariants:
//!
//! - stock conservation: a gift's claimed count never exceeds its total stock,
//!   under any interleaving of concurrent claims
//! - at most one claim per identity
//! - weighted fairness: selection probability proportional to weight among
//!   currently available gifts
//!
//! The commit is two-phase: a guarded atomic increment on the chosen gift,
//! then a ledger write. A lost increment race retries with a refreshed
//! candidate set; a failed ledger write triggers a compensating decrement.

pub mod draw;
pub mod errors;
pub mod manager;
pub mod models;

pub use draw::{draw, pick_weighted};
pub use errors::{AllocationError, AllocationResult};
pub use manager::Allocator;
pub use models::ClaimOutcome;
