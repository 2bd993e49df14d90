use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Always `"Healthy"` while the process is serving.
    pub message: &'static str,
}

/// GET /health -- lets callers know the service is up.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: StatusCode::OK.as_u16(),
        message: "Healthy",
    })
}

/// GET / -- plain-text service description.
async fn index() -> &'static str {
    concat!(
        "Promotions REST API v",
        env!("CARGO_PKG_VERSION"),
        ". Manage promotions at /promotions; check liveness at /health."
    )
}

/// Mount the health check and index routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(index))
}
