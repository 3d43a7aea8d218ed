//! Axum route handlers for the Candidate API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::intake::payloads::{intake_candidate, CandidatePayload};
use crate::matching::anonymise::anonymise;
use crate::models::candidate::Candidate;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CandidateCreatedResponse {
    pub candidate_id: String,
}

/// POST /api/v1/candidates
///
/// Validates the submission, asserts consent, and stores the candidate.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CandidatePayload>,
) -> Result<(StatusCode, Json<CandidateCreatedResponse>), AppError> {
    let candidate = intake_candidate(payload, Utc::now())?;
    let candidate_id = candidate.candidate_id.clone();

    let mut store = state.store.write().await;
    store.add(candidate)?;
    debug!(stored = store.len(), "store size after intake");

    Ok((
        StatusCode::CREATED,
        Json(CandidateCreatedResponse { candidate_id }),
    ))
}

/// GET /api/v1/candidates/:id
///
/// Returns the anonymised view; raw identifiers never leave the service.
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state
        .store
        .read()
        .await
        .get(&candidate_id, Utc::now())?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    Ok(Json(anonymise(&candidate)))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.write().await.delete(&candidate_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Candidate {candidate_id} not found"
        )))
    }
}
