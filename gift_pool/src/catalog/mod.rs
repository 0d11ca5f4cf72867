//! Catalog module providing gift type definitions and stock bookkeeping.
//!
//! The catalog is the source of truth for "what is left to win": every gift
//! type has a fixed `total_stock` set at seed time and a `claimed_count` that
//! only moves through guarded atomic updates. The catalog also owns the
//! administrative reset operation that wipes claims and reloads the gift set
//! from a seed definition.

pub mod errors;
pub mod manager;
pub mod models;
pub mod seed;

pub use errors::{CatalogError, CatalogResult};
pub use manager::CatalogManager;
pub use models::{GiftId, GiftType};
pub use seed::{GiftSeed, load_seed_file, parse_seed};
