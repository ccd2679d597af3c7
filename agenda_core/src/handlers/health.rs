//! Liveness and storage health

use crate::{models::ApiResponse, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /health");

    let backend = state.appointment_service.backend_name();

    match state.appointment_service.get_stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().timestamp(),
                "storage": backend,
                "store_stats": stats,
                "version": state.version,
            }))),
        ),
        Err(e) => {
            warn!("Storage backend {} is unhealthy: {}", backend, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(format!("Storage backend {} unavailable", backend))),
            )
        }
    }
}

pub async fn handle_liveness() -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now().timestamp()
    }))))
}
