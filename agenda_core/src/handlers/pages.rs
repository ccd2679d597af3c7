//! The menu and its three screens

use crate::{
    error::{AppError, Result},
    handlers::views::{self, CreateView, Notice},
    models::{AppointmentForm, CancelForm, Screen, ScreenQuery},
    services::appointment_service::parse_date,
    validation::DATE_FORMAT,
    AppState,
};
use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    http::StatusCode,
    response::Html,
};
use tracing::{info, warn};

type PageResponse = (StatusCode, Html<String>);

pub async fn handle_index(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
) -> PageResponse {
    let screen = query.screen.unwrap_or_default();
    info!("GET / - screen: {:?}", screen);

    render(&state, screen, query.date, None).await
}

pub async fn handle_book(
    State(state): State<AppState>,
    Form(form): Form<AppointmentForm>,
) -> PageResponse {
    info!("Form submission - date: {}, time: {}", form.date, form.time);
    let date = Some(form.date.clone());

    match state.appointment_service.book(form).await {
        Ok(appointment) => {
            let notice = Notice::Success(format!(
                "Appointment booked for {} (ID {})",
                appointment.datetime, appointment.id
            ));
            render(&state, Screen::Create, date, Some(notice)).await
        }
        Err(err) => failed(&state, Screen::Create, date, err).await,
    }
}

pub async fn handle_cancel(
    State(state): State<AppState>,
    form: std::result::Result<Form<CancelForm>, FormRejection>,
) -> PageResponse {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let err = AppError::BadRequest(format!("Invalid cancel selection: {}", rejection.body_text()));
            return failed(&state, Screen::Cancel, None, err).await;
        }
    };
    info!("Cancel submission - index: {}", form.index);

    match state.appointment_service.cancel(form.index).await {
        Ok(appointment) => {
            let notice = Notice::Success(format!(
                "Appointment {} on {} cancelled",
                appointment.id, appointment.datetime
            ));
            render(&state, Screen::Cancel, None, Some(notice)).await
        }
        Err(err) => failed(&state, Screen::Cancel, None, err).await,
    }
}

async fn failed(state: &AppState, screen: Screen, date: Option<String>, err: AppError) -> PageResponse {
    warn!("{:?} screen action failed: {}", screen, err);
    let status = err.status_code();
    let date = date.filter(|d| parse_date(d).is_ok());
    let (_, html) = render(state, screen, date, Some(Notice::Error(err.user_message()))).await;
    (status, html)
}

async fn render(
    state: &AppState,
    screen: Screen,
    date: Option<String>,
    notice: Option<Notice>,
) -> PageResponse {
    match screen_body(state, screen, date).await {
        Ok(body) => (
            StatusCode::OK,
            Html(views::page(&state.app_name, screen, notice.as_ref(), &body)),
        ),
        Err(err) => {
            warn!("Could not render {:?} screen: {}", screen, err);
            let notice = Notice::Error(err.user_message());
            (
                err.status_code(),
                Html(views::page(&state.app_name, screen, Some(&notice), "")),
            )
        }
    }
}

async fn screen_body(state: &AppState, screen: Screen, date: Option<String>) -> Result<String> {
    let service = &state.appointment_service;

    match screen {
        Screen::Create => {
            let date = match date.filter(|d| !d.trim().is_empty()) {
                Some(date) => parse_date(&date)?,
                None => chrono::Local::now().date_naive(),
            };
            let date = date.format(DATE_FORMAT).to_string();
            let hours = service.available_hours_for(&date).await?;

            Ok(views::create_screen(&CreateView { date: &date, hours: &hours }))
        }
        Screen::List => Ok(views::list_screen(&service.list().await?)),
        Screen::Cancel => Ok(views::cancel_screen(&service.list().await?)),
    }
}
