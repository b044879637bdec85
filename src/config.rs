use std::time::Duration;

use crate::error::{AppError, Result};

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_SOURCE_NAME: &str = "YouTube Music";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_api_url: String,
    pub spotify_accounts_url: String,
    pub source_api_url: String,
    pub source_name: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let spotify_client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_ID not set".into()))?;

        let spotify_client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_SECRET not set".into()))?;

        let source_api_url = std::env::var("SOURCE_API_URL")
            .map_err(|_| AppError::Config("SOURCE_API_URL not set".into()))?;

        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                AppError::Config(format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            spotify_client_id,
            spotify_client_secret,
            spotify_redirect_uri: env_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            spotify_api_url: env_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            spotify_accounts_url: env_or("SPOTIFY_ACCOUNTS_URL", DEFAULT_SPOTIFY_ACCOUNTS_URL),
            source_api_url,
            source_name: env_or("SOURCE_NAME", DEFAULT_SOURCE_NAME),
            http_timeout,
        })
    }

    /// Config pointing both catalogs at one mock server.
    #[cfg(test)]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            spotify_client_id: "client-id".to_string(),
            spotify_client_secret: "client-secret".to_string(),
            spotify_redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            spotify_api_url: base_url.trim_end_matches('/').to_string(),
            spotify_accounts_url: base_url.trim_end_matches('/').to_string(),
            source_api_url: base_url.trim_end_matches('/').to_string(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.spotify_client_id.is_empty() {
            missing.push("SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify_client_secret.is_empty() {
            missing.push("SPOTIFY_CLIENT_SECRET".to_string());
        }
        if self.source_api_url.is_empty() {
            missing.push("SOURCE_API_URL".to_string());
        }

        missing
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
