//! Claim ledger module: the registry of completed claims.
//!
//! A claim record binds one claimant name to one awarded gift type. The
//! ledger is the sole source of truth for "has this visitor already claimed?"
//! — any client-side claimed flag is advisory and must be reconciled against
//! a ledger check before being trusted.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{LedgerError, LedgerResult};
pub use manager::ClaimLedger;
pub use models::ClaimRecord;
