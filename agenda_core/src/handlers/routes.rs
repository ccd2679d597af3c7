//! Route table for the form screens, the JSON API and health probes

use crate::{
    handlers::{api, health, pages},
    AppState,
};
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::handle_index))
        .route("/appointments", post(pages::handle_book))
        .route("/appointments/cancel", post(pages::handle_cancel))
        .route("/health", get(health::handle_health))
        .route("/live", get(health::handle_liveness))
        .route("/api/stats", get(api::handle_stats))
        .route(
            "/api/appointments",
            get(api::handle_list_appointments).post(api::handle_create_appointment),
        )
        .route("/api/appointments/:index", delete(api::handle_delete_appointment))
        .route("/api/availability", get(api::handle_availability))
}
