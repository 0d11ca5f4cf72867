//! Weighted random selection.
//!
//! The draw walks the candidates in the catalog's natural listing order,
//! subtracting each weight from the drawn value; the first candidate at which
//! the remainder drops to zero or below wins. Floating-point accumulation can
//! leave the remainder positive after the last candidate even though the
//! value was drawn below the weight total — in that case the last candidate
//! is selected rather than failing the draw.

use rand::Rng;

use crate::catalog::GiftType;

/// Deterministic weighted pick for a pre-drawn value `r`.
///
/// Candidates must already be filtered to available gifts; the pick does not
/// re-check stock. Returns `None` only for an empty candidate list.
pub fn pick_weighted(candidates: &[GiftType], mut r: f64) -> Option<&GiftType> {
    for gift in candidates {
        r -= gift.weight;
        if r <= 0.0 {
            return Some(gift);
        }
    }
    // Rounding left the remainder positive; fall back to the last candidate
    candidates.last()
}

/// Draw one gift from the candidates, probability proportional to weight.
pub fn draw(candidates: &[GiftType]) -> Option<&GiftType> {
    if candidates.is_empty() {
        return None;
    }

    let total: f64 = candidates.iter().map(|g| g.weight).sum();
    if !(total > 0.0) {
        // Weights are validated positive at seed time; this only guards a
        // store hand-edited out from under us
        return candidates.last();
    }

    let r = rand::rng().random_range(0.0..total);
    pick_weighted(candidates, r)
}
