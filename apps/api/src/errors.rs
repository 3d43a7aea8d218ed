use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::payloads::IntakeError;
use crate::matching::consent::ConsentError;
use crate::matching::error::MatchError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Consent required: {0}")]
    ConsentRequired(ConsentError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Retention expired: {0}")]
    RetentionExpired(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Consent(e) => AppError::ConsentRequired(e),
            MatchError::InvalidConfiguration(msg) => AppError::InvalidConfiguration(msg),
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(msg) => AppError::Validation(msg),
            IntakeError::Consent(e) => AppError::ConsentRequired(e),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Consent(e) => AppError::ConsentRequired(e),
            e @ StoreError::RetentionExpired { .. } => AppError::RetentionExpired(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ConsentRequired(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONSENT_REQUIRED",
                e.to_string(),
            ),
            AppError::InvalidConfiguration(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_CONFIGURATION",
                msg.clone(),
            ),
            AppError::RetentionExpired(msg) => (StatusCode::GONE, "RETENTION_EXPIRED", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
