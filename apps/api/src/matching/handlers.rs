//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::intake::payloads::{parse_job_description, JobPayload};
use crate::matching::aggregate::Weights;
use crate::matching::orchestrator::match_candidate;
use crate::matching::shortlist::{format_results, shortlist, shortlist_consented};
use crate::models::match_result::MatchResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate_id: String,
    pub job: JobPayload,
    pub weights: Option<Weights>,
}

#[derive(Debug, Deserialize)]
pub struct ShortlistRequest {
    pub job: JobPayload,
    pub max_results: Option<usize>,
    pub weights: Option<Weights>,
    /// When false, unconsented candidates are dropped instead of failing the run.
    pub strict: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub jd_id: String,
    pub results: Vec<Map<String, Value>>,
    pub summary: String,
}

fn resolve_weights(requested: Option<Weights>, state: &AppState) -> Result<Weights, AppError> {
    let weights = requested.unwrap_or(state.config.weights);
    weights.validate()?;
    Ok(weights)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores one stored candidate against the submitted job description.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let jd = parse_job_description(request.job)?;
    let weights = resolve_weights(request.weights, &state)?;

    let candidate = state
        .store
        .read()
        .await
        .get(&request.candidate_id, Utc::now())?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", request.candidate_id))
        })?;

    let result = match_candidate(&candidate, &jd, &weights)?;
    let body = result
        .as_flat_map()
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(body))
}

/// POST /api/v1/shortlist
///
/// Ranks every active stored candidate against the submitted job description.
/// Strict mode (default) propagates the first consent failure.
pub async fn handle_shortlist(
    State(state): State<AppState>,
    Json(request): Json<ShortlistRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    let jd = parse_job_description(request.job)?;
    let weights = resolve_weights(request.weights, &state)?;
    let max_results = request
        .max_results
        .unwrap_or(state.config.shortlist_max_results);
    let strict = request.strict.unwrap_or(true);

    let candidates = state.store.read().await.active_candidates(Utc::now())?;

    // CPU-bound and parallel via rayon; keep it off the async workers.
    let jd_id = jd.jd_id.clone();
    let results = tokio::task::spawn_blocking(move || {
        if strict {
            shortlist(&candidates, &jd, &weights, max_results)
        } else {
            shortlist_consented(&candidates, &jd, &weights, max_results)
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let flattened = results
        .iter()
        .map(MatchResult::as_flat_map)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(ShortlistResponse {
        jd_id,
        summary: format_results(&results),
        results: flattened,
    }))
}
