//! Vocabulary lookup, health check and the shutdown endpoint.

use axum::{extract::State, http::StatusCode, response::Json};
use shared::{ShutdownResponse, VocabularyResponse};
use tracing::info;

use crate::io::rest::mappers::record_mapper::RecordMapper;
use crate::lifecycle::SHUTDOWN_DELAY;
use crate::AppState;

/// GET /api/vocabulary
pub async fn get_vocabulary(State(state): State<AppState>) -> Json<VocabularyResponse> {
    Json(RecordMapper::to_vocabulary_response(
        state.record_form_validator.vocabulary(),
    ))
}

/// GET /api/health
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// POST /api/shutdown
///
/// Answers first, then stops the server after `SHUTDOWN_DELAY`.
pub async fn shutdown(State(state): State<AppState>) -> Json<ShutdownResponse> {
    info!("POST /api/shutdown");
    state.shutdown.trigger_after(SHUTDOWN_DELAY);
    Json(ShutdownResponse {
        message: "Server is shutting down".to_string(),
    })
}
