pub mod settings;

pub use settings::{AppConfig, CorsConfig, ScheduleConfig, ServerConfig, SheetsConfig, StorageBackend, StorageConfig};
