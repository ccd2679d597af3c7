//! Access tokens for the spreadsheet API
//!
//! A service-account key signs a short-lived RS256 assertion that the token
//! endpoint exchanges for a bearer token.

use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const ASSERTION_LIFETIME_SECONDS: i64 = 3600;
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Authentication(format!(
                "Could not read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        let key: ServiceAccountKey = serde_json::from_str(&raw).map_err(|e| {
            AppError::Authentication(format!("Invalid credentials file {}: {}", path.display(), e))
        })?;

        if key.client_email.is_empty() || key.private_key.is_empty() {
            return Err(AppError::Authentication(
                "Credentials file is missing client_email or private_key".to_string(),
            ));
        }

        Ok(key)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, now: DateTime<Utc>) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: SPREADSHEETS_SCOPE.to_string(),
            aud: key.token_uri().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECONDS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECONDS
}

#[derive(Debug, Clone)]
pub struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECONDS) < self.expires_at
    }
}

pub enum TokenProvider {
    Static(String),
    ServiceAccount {
        key: ServiceAccountKey,
        http: reqwest::Client,
        cached: Mutex<Option<CachedToken>>,
    },
}

impl TokenProvider {
    pub fn fixed(token: impl Into<String>) -> Self {
        TokenProvider::Static(token.into())
    }

    pub fn service_account(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        TokenProvider::ServiceAccount {
            key,
            http,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String> {
        match self {
            TokenProvider::Static(token) => Ok(token.clone()),
            TokenProvider::ServiceAccount { key, http, cached } => {
                let mut cached = cached.lock().await;
                let now = Utc::now();

                if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
                    return Ok(token.value.clone());
                }

                let token = request_token(key, http, now).await?;
                let value = token.value.clone();
                *cached = Some(token);
                Ok(value)
            }
        }
    }
}

pub fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&header, &AssertionClaims::new(key, now), &encoding_key)?)
}

async fn request_token(
    key: &ServiceAccountKey,
    http: &reqwest::Client,
    now: DateTime<Utc>,
) -> Result<CachedToken> {
    let assertion = sign_assertion(key, now)?;
    debug!("Requesting spreadsheet access token for {}", key.client_email);

    let response = http
        .post(key.token_uri())
        .form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Authentication(format!(
            "Token endpoint returned {}: {}",
            status, body
        )));
    }

    let token: TokenResponse = response.json().await?;
    info!("Obtained spreadsheet access token, valid for {}s", token.expires_in);

    Ok(CachedToken {
        value: token.access_token,
        expires_at: now + Duration::seconds(token.expires_in),
    })
}
