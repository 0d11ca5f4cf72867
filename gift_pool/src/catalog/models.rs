//! Gift catalog data models.

use serde::{Deserialize, Serialize};

/// Gift type identifier, stable across the catalog
pub type GiftId = String;

/// One distinct prize category with its own stock and selection weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftType {
    pub id: GiftId,
    pub name: String,
    /// Relative likelihood of selection among currently available gifts
    pub weight: f64,
    /// Fixed capacity, set at catalog seed time
    pub total_stock: u32,
    /// Units awarded so far; `0 <= claimed_count <= total_stock`
    pub claimed_count: u32,
    pub image_url: Option<String>,
}

impl GiftType {
    /// Whether at least one unit of stock remains
    pub fn is_available(&self) -> bool {
        self.claimed_count < self.total_stock
    }

    /// Units of stock still unclaimed
    pub fn remaining(&self) -> u32 {
        self.total_stock.saturating_sub(self.claimed_count)
    }
}
