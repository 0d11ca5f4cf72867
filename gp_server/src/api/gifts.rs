//! Gift catalog API handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use gift_pool::catalog::GiftType;

use super::{AppState, ErrorResponse, error_response};

/// Gift type with derived stock status, as exposed to clients
#[derive(Debug, Serialize)]
pub struct GiftSummary {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub total_stock: u32,
    pub claimed_count: u32,
    pub remaining: u32,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl From<GiftType> for GiftSummary {
    fn from(gift: GiftType) -> Self {
        let remaining = gift.remaining();
        let is_available = gift.is_available();
        Self {
            id: gift.id,
            name: gift.name,
            weight: gift.weight,
            total_stock: gift.total_stock,
            claimed_count: gift.claimed_count,
            remaining,
            is_available,
            image_url: gift.image_url,
        }
    }
}

/// List all gift types with their stock status.
pub async fn list_gifts(
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftSummary>>, (StatusCode, Json<ErrorResponse>)> {
    let gifts = state.catalog.list_gifts().await.map_err(|e| {
        tracing::error!("failed to list gifts: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
    })?;

    Ok(Json(gifts.into_iter().map(GiftSummary::from).collect()))
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
    pub gift_count: usize,
}

/// Wipe all gifts and claims and reload the catalog from the seed
/// definition. Administrative.
pub async fn reset_gifts(
    State(state): State<AppState>,
) -> Result<Json<ResetResponse>, (StatusCode, Json<ErrorResponse>)> {
    state.catalog.reset(&state.seed).await.map_err(|e| {
        tracing::error!("catalog reset failed: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
    })?;

    Ok(Json(ResetResponse {
        message: "Catalog reset successfully",
        gift_count: state.seed.len(),
    }))
}
