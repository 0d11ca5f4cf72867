//! Gift seed definitions loaded from a JSON file.
//!
//! The seed file is the fixed definition the administrative reset reloads the
//! catalog from. Format:
//!
//! ```json
//! {
//!   "gifts": [
//!     { "id": "plush_bear", "name": "Plush Bear", "weight": 3.0,
//!       "total_stock": 10, "image_url": "/images/bear.png" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use super::models::{GiftId, GiftType};

/// One gift type definition in the seed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftSeed {
    pub id: GiftId,
    pub name: String,
    pub weight: f64,
    pub total_stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl GiftSeed {
    /// Materialize a fresh gift type with zero claims
    pub fn into_gift(self) -> GiftType {
        GiftType {
            id: self.id,
            name: self.name,
            weight: self.weight,
            total_stock: self.total_stock,
            claimed_count: 0,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    gifts: Vec<GiftSeed>,
}

/// Parse and validate a seed definition from a JSON string
pub fn parse_seed(json: &str) -> CatalogResult<Vec<GiftSeed>> {
    let file: SeedFile = serde_json::from_str(json)
        .map_err(|e| CatalogError::InvalidSeed(format!("malformed JSON: {e}")))?;
    validate_seed(&file.gifts)?;
    Ok(file.gifts)
}

/// Load and validate a seed definition from a file path
pub fn load_seed_file(path: impl AsRef<Path>) -> CatalogResult<Vec<GiftSeed>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CatalogError::InvalidSeed(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_seed(&contents)
}

/// Validate a seed list: non-empty ids and names, positive weights, unique ids
pub fn validate_seed(gifts: &[GiftSeed]) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for gift in gifts {
        if gift.id.trim().is_empty() {
            return Err(CatalogError::InvalidSeed("gift id must not be empty".to_string()));
        }
        if gift.name.trim().is_empty() {
            return Err(CatalogError::InvalidSeed(format!(
                "gift {} has an empty name",
                gift.id
            )));
        }
        if !(gift.weight > 0.0) || !gift.weight.is_finite() {
            return Err(CatalogError::InvalidSeed(format!(
                "gift {} has non-positive weight {}",
                gift.id, gift.weight
            )));
        }
        if !seen.insert(gift.id.as_str()) {
            return Err(CatalogError::InvalidSeed(format!(
                "duplicate gift id: {}",
                gift.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_seed() {
        let json = r#"{
            "gifts": [
                { "id": "bear", "name": "Plush Bear", "weight": 3.0, "total_stock": 10 },
                { "id": "mug", "name": "Mug", "weight": 1.0, "total_stock": 5,
                  "image_url": "/images/mug.png" }
            ]
        }"#;

        let seed = parse_seed(json).expect("Seed should parse");
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, "bear");
        assert_eq!(seed[1].image_url.as_deref(), Some("/images/mug.png"));

        let gift = seed[0].clone().into_gift();
        assert_eq!(gift.claimed_count, 0);
        assert_eq!(gift.total_stock, 10);
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_seed("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSeed(_)));
    }

    #[test]
    fn test_reject_non_positive_weight() {
        let json = r#"{ "gifts": [
            { "id": "bear", "name": "Bear", "weight": 0.0, "total_stock": 1 }
        ]}"#;
        let err = parse_seed(json).unwrap_err();
        assert!(err.to_string().contains("weight"), "got: {err}");
    }

    #[test]
    fn test_reject_duplicate_ids() {
        let json = r#"{ "gifts": [
            { "id": "bear", "name": "Bear", "weight": 1.0, "total_stock": 1 },
            { "id": "bear", "name": "Other Bear", "weight": 1.0, "total_stock": 1 }
        ]}"#;
        let err = parse_seed(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "got: {err}");
    }

    #[test]
    fn test_reject_empty_id() {
        let json = r#"{ "gifts": [
            { "id": "  ", "name": "Bear", "weight": 1.0, "total_stock": 1 }
        ]}"#;
        assert!(parse_seed(json).is_err());
    }

    #[test]
    fn test_zero_stock_is_allowed() {
        // A gift can be seeded with zero stock; it is simply never available.
        let json = r#"{ "gifts": [
            { "id": "bear", "name": "Bear", "weight": 1.0, "total_stock": 0 }
        ]}"#;
        let seed = parse_seed(json).expect("Zero stock should be valid");
        assert!(!seed[0].clone().into_gift().is_available());
    }
}
