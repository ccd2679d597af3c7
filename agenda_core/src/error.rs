//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slot {0} is already booked")]
    SlotTaken(String),

    #[error("Spreadsheet error: {0}")]
    RemoteApi(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotTaken(_) => StatusCode::CONFLICT,
            AppError::RemoteApi(_) | AppError::Authentication(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_)
            | AppError::IoError(_)
            | AppError::JsonError(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::Validation(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::SlotTaken(slot) => format!("The slot {} is no longer available", slot),
            AppError::RemoteApi(_) | AppError::Authentication(_) => {
                "Could not reach the spreadsheet, please try again".to_string()
            }
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteApi(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Authentication(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::RemoteApi(msg) => tracing::error!("Spreadsheet error: {}", msg),
            AppError::Authentication(msg) => tracing::error!("Spreadsheet auth error: {}", msg),
            AppError::Storage(msg) => tracing::error!("Storage error: {}", msg),
            AppError::IoError(err) => tracing::error!("IO error: {:?}", err),
            AppError::JsonError(err) => tracing::error!("JSON error: {:?}", err),
            AppError::Other(err) => tracing::error!("Unexpected error: {:?}", err),
            _ => {}
        }

        let body = Json(json!({
            "error": self.user_message(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
