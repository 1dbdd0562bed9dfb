use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub temp_dir: String,
    pub version: String,
}

/// `GET /health`: liveness probe reporting upload directory availability
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let temp_dir_status = if state.uploads.temp_dir().is_dir() {
        "available"
    } else {
        "unavailable"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        temp_dir: temp_dir_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
