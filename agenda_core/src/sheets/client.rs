//! Thin client for the spreadsheet values API (get, append, clear, update)

use crate::config::SheetsConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::{ServiceAccountKey, TokenProvider};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    fn rows(values: Vec<Vec<String>>) -> Self {
        Self {
            range: None,
            major_dimension: Some("ROWS".to_string()),
            values,
        }
    }
}

#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    tokens: Arc<TokenProvider>,
}

impl SheetsClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        tokens: TokenProvider,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            spreadsheet_id: spreadsheet_id.into(),
            tokens: Arc::new(tokens),
        }
    }

    /// Builds a client from configuration, reading the service-account key
    /// unless a fixed access token is configured.
    pub fn from_config(config: &SheetsConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let tokens = match &config.access_token {
            Some(token) if !token.is_empty() => TokenProvider::fixed(token.clone()),
            _ => {
                let key = ServiceAccountKey::from_file(&config.credentials_path)?;
                TokenProvider::service_account(key, http.clone())
            }
        };

        Ok(Self::new(http, config.api_base_url.clone(), config.spreadsheet_id.clone(), tokens))
    }

    fn values_url(&self, target: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::RemoteApi(format!("Invalid API base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::RemoteApi("API base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", target]);

        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn check(response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Spreadsheet {} failed with {}: {}", operation, status, body);
        Err(AppError::RemoteApi(format!("{} returned {}", operation, status)))
    }

    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        debug!("GET values {}", range);
        let url = self.values_url(range)?;

        let response = self.request(Method::GET, url).await?.send().await?;
        let body: ValueRange = Self::check(response, "get").await?.json().await?;

        Ok(body.values)
    }

    pub async fn append_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        debug!("APPEND {} rows to {}", rows.len(), range);
        let mut url = self.values_url(&format!("{}:append", range))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .request(Method::POST, url)
            .await?
            .json(&ValueRange::rows(rows))
            .send()
            .await?;
        Self::check(response, "append").await?;

        Ok(())
    }

    pub async fn clear_values(&self, range: &str) -> Result<()> {
        debug!("CLEAR {}", range);
        let url = self.values_url(&format!("{}:clear", range))?;

        let response = self
            .request(Method::POST, url)
            .await?
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check(response, "clear").await?;

        Ok(())
    }

    pub async fn update_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        debug!("UPDATE {} with {} rows", range, rows.len());
        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRange {
            range: Some(range.to_string()),
            ..ValueRange::rows(rows)
        };

        let response = self.request(Method::PUT, url).await?.json(&body).send().await?;
        Self::check(response, "update").await?;

        Ok(())
    }
}
