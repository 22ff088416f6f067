//! Liveness endpoint, reporting whether the store answers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
}

/// GET /health
///
/// 200 while the store answers a trivial query, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.store().count_questions().await {
        Ok(_) => (StatusCode::OK, "ok", "reachable"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
