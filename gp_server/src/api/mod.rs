//! HTTP API for the gift giveaway server.
//!
//! # Endpoints Overview
//!
//! ## Gifts
//! - `GET  /api/gifts` - List all gift types with stock status
//! - `POST /api/gifts/reset` - Reseed the catalog and clear the claim ledger
//!
//! ## Claims
//! - `POST   /api/claims` - Attempt a claim for a visitor name
//! - `GET    /api/claims` - List all claim records
//! - `GET    /api/claims/check?name=` - Check whether a name has already won
//! - `DELETE /api/claims/{id}` - Reverse a claim, restoring one unit of stock
//!
//! ## Health Check
//! - `GET /health` - Server health status
//!
//! "No gift available" and "already claimed" are normal response bodies, not
//! HTTP errors; real failures return a sanitized error message that never
//! leaks storage detail.

pub mod claims;
pub mod gifts;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use gift_pool::allocator::{AllocationError, Allocator};
use gift_pool::catalog::{CatalogManager, GiftSeed};
use gift_pool::ledger::ClaimLedger;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogManager>,
    pub allocator: Arc<Allocator>,
    pub ledger: Arc<ClaimLedger>,
    /// Fixed seed definition the reset endpoint reloads from
    pub seed: Arc<Vec<GiftSeed>>,
}

/// Generic error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn allocation_error_response(err: &AllocationError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        AllocationError::EmptyIdentity => StatusCode::BAD_REQUEST,
        AllocationError::Contention { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AllocationError::Ledger(gift_pool::ledger::LedgerError::ClaimNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        AllocationError::Catalog(gift_pool::catalog::CatalogError::GiftNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.client_message())
}

/// Create the application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/gifts", get(gifts::list_gifts))
        .route("/api/gifts/reset", post(gifts::reset_gifts))
        .route(
            "/api/claims",
            post(claims::attempt_claim).get(claims::list_claims),
        )
        .route("/api/claims/check", get(claims::check_claim))
        .route("/api/claims/{id}", delete(claims::delete_claim))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
