//! Core library for the appointment agenda: storage backends, booking rules
//! and the HTTP surface serving the form screens.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod sheets;
pub mod store;
pub mod validation;

pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{Appointment, AppointmentForm};
pub use services::AppointmentService;
pub use sheets::SheetsClient;
pub use store::{AppointmentStore, JsonFileStore, MemoryStore, SheetsStore};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub appointment_service: AppointmentService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config::ScheduleConfig::default())
    }
}

impl AppState {
    pub fn with_store(store: Arc<dyn AppointmentStore>, schedule: config::ScheduleConfig) -> Self {
        Self {
            app_name: "Appointment Agenda".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            appointment_service: AppointmentService::new(store, schedule),
        }
    }

    /// Picks the storage backend named in the configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn AppointmentStore> = match config.storage.backend {
            StorageBackend::Sheets => {
                info!(
                    "Using spreadsheet {} range {}",
                    config.sheets.spreadsheet_id, config.sheets.range
                );
                let client = SheetsClient::from_config(&config.sheets)?;
                Arc::new(SheetsStore::new(client, config.sheets.range.clone()))
            }
            StorageBackend::Json => {
                info!("Using JSON file {}", config.storage.json_path.display());
                Arc::new(JsonFileStore::new(config.storage.json_path.clone()))
            }
            StorageBackend::Memory => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(store, config.schedule))
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: AppConfig) -> Router {
    let router = Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors));

    middleware::logging::with_request_tracing(router).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
