use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub sheets: SheetsConfig,
    pub schedule: ScheduleConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sheets,
    Json,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub json_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub credentials_path: PathBuf,
    pub api_base_url: String,
    /// Skips the service-account exchange when set.
    pub access_token: Option<String>,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub open_hour: u32,
    pub close_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            json_path: PathBuf::from("./appointments.json"),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: "Hoja 1!A:E".to_string(),
            credentials_path: PathBuf::from("credential.json"),
            api_base_url: "https://sheets.googleapis.com/v4".to_string(),
            access_token: None,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 17,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        match self.storage.backend {
            StorageBackend::Json if self.storage.json_path.as_os_str().is_empty() => {
                return Err(ConfigError::Message(
                    "JSON storage path cannot be empty".to_string(),
                ));
            }
            StorageBackend::Sheets => {
                if self.sheets.spreadsheet_id.trim().is_empty() {
                    return Err(ConfigError::Message(
                        "Spreadsheet id cannot be empty when using the sheets backend".to_string(),
                    ));
                }
                if self.sheets.range.trim().is_empty() {
                    return Err(ConfigError::Message(
                        "Spreadsheet range cannot be empty".to_string(),
                    ));
                }
            }
            _ => {}
        }

        if self.schedule.close_hour > 23 {
            return Err(ConfigError::Message(
                "Closing hour must be between 0 and 23".to_string(),
            ));
        }

        if self.schedule.open_hour > self.schedule.close_hour {
            return Err(ConfigError::Message(
                "Opening hour cannot be after closing hour".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.sheets.range, "Hoja 1!A:E");
        assert_eq!(config.schedule.open_hour, 9);
        assert_eq!(config.schedule.close_hour, 17);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.storage.backend = StorageBackend::Sheets;
        assert!(config.validate().is_err());
        config.sheets.spreadsheet_id = "abc123".to_string();
        assert!(config.validate().is_ok());

        config = AppConfig::default();
        config.storage.json_path = PathBuf::new();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.schedule.open_hour = 18;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.schedule.close_hour = 24;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_config_loading() {
        let config = AppConfig::load().expect("Should load default configuration");

        assert!(!config.server.host.is_empty());
        assert!(config.server.port > 0);
        assert!(config.schedule.open_hour <= config.schedule.close_hour);
    }
}
