//! JSON endpoints mirroring the form screens

use crate::{
    error::Result,
    models::{ApiResponse, AppointmentForm, Availability, AvailabilityQuery},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub async fn handle_list_appointments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    info!("GET /api/appointments");

    let appointments = state.appointment_service.list().await?;

    Ok(Json(ApiResponse::success(serde_json::json!({
        "count": appointments.len(),
        "appointments": appointments,
    }))))
}

pub async fn handle_create_appointment(
    State(state): State<AppState>,
    Json(form): Json<AppointmentForm>,
) -> Result<impl IntoResponse> {
    info!("POST /api/appointments - date: {}, time: {}", form.date, form.time);

    let appointment = state.appointment_service.book(form).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(appointment))))
}

pub async fn handle_delete_appointment(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse> {
    info!("DELETE /api/appointments/{}", index);

    let removed = state.appointment_service.cancel(index).await?;

    Ok(Json(ApiResponse::success(serde_json::json!({
        "message": "Appointment cancelled",
        "deleted": removed,
    }))))
}

pub async fn handle_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse> {
    info!("GET /api/availability - date: {}", query.date);

    let hours = state.appointment_service.available_hours_for(&query.date).await?;

    Ok(Json(ApiResponse::success(Availability {
        date: query.date,
        hours,
    })))
}

pub async fn handle_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.appointment_service.get_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}
