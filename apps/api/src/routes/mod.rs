pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intake::handlers as candidates;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate API
        .route("/api/v1/candidates", post(candidates::handle_create_candidate))
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate).delete(candidates::handle_delete_candidate),
        )
        // Matching API
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/shortlist", post(matching::handle_shortlist))
        .with_state(state)
}
