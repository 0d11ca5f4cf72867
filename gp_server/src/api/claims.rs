//! Claim API handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gift_pool::allocator::ClaimOutcome;
use gift_pool::catalog::GiftType;
use gift_pool::ledger::ClaimRecord;

use super::{AppState, ErrorResponse, allocation_error_response, error_response};

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub name: String,
}

/// Claim attempt response. `awarded` is null for the two normal non-award
/// outcomes, which are distinguished by `reason`.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub awarded: Option<GiftType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ClaimRecord>,
}

/// Attempt to claim a gift for the given visitor name.
pub async fn attempt_claim(
    State(state): State<AppState>,
    Json(request): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .allocator
        .attempt_claim(&request.name)
        .await
        .map_err(|e| {
            if !e.is_transient() {
                tracing::error!("claim attempt failed: {e}");
            }
            allocation_error_response(&e)
        })?;

    let response = match outcome {
        ClaimOutcome::Awarded { gift, record } => ClaimResponse {
            awarded: Some(gift),
            reason: None,
            record: Some(record),
        },
        ClaimOutcome::Exhausted => ClaimResponse {
            awarded: None,
            reason: Some("exhausted"),
            record: None,
        },
        ClaimOutcome::AlreadyClaimed { existing } => ClaimResponse {
            awarded: None,
            reason: Some("already-claimed"),
            record: Some(existing),
        },
    };
    Ok(Json(response))
}

/// List all claim records. Administrative.
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimRecord>>, (StatusCode, Json<ErrorResponse>)> {
    let claims = state.ledger.list_claims().await.map_err(|e| {
        tracing::error!("failed to list claims: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
    })?;
    Ok(Json(claims))
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub has_won: bool,
    pub winner: Option<ClaimRecord>,
}

/// Check whether a visitor name already holds a claim. Advisory for clients;
/// the ledger remains the source of truth at claim time.
pub async fn check_claim(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<CheckResponse>, (StatusCode, Json<ErrorResponse>)> {
    if params.name.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Name is required",
        ));
    }

    let winner = state.ledger.find_claim(&params.name).await.map_err(|e| {
        tracing::error!("claim check failed: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.client_message())
    })?;

    Ok(Json(CheckResponse {
        has_won: winner.is_some(),
        winner,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteClaimResponse {
    pub message: &'static str,
    pub gift_id: String,
}

/// Delete a claim record and restore one unit of stock to the gift it
/// referenced. Administrative.
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<Uuid>,
) -> Result<Json<DeleteClaimResponse>, (StatusCode, Json<ErrorResponse>)> {
    let gift_id = state
        .allocator
        .release_claim(claim_id)
        .await
        .map_err(|e| allocation_error_response(&e))?;

    Ok(Json(DeleteClaimResponse {
        message: "Claim deleted and stock restored",
        gift_id,
    }))
}
