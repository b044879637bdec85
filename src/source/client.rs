use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::source::SourceCatalog;
use crate::source::models::{SourcePlaylist, SourcePlaylistSummary};

/// HTTP client for the source catalog's JSON API.
pub struct SourceClient {
    http_client: Client,
    base_url: String,
}

impl SourceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http_client,
            base_url: config.source_api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::SourceFetch(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::SourceFetch(format!("{} not found", what)));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::SourceFetch(format!(
                "{} request failed: {}, {}",
                what,
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SourceFetch(format!("Failed to parse {}: {}", what, e)))
    }
}

#[async_trait]
impl SourceCatalog for SourceClient {
    async fn list_playlists(&self, user_id: &str) -> Result<Vec<SourcePlaylistSummary>> {
        let url = format!(
            "{}/users/{}/playlists",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let playlists: Vec<SourcePlaylistSummary> =
            self.get_json(&url, &format!("User {}", user_id)).await?;

        info!("Found {} playlists for user {}", playlists.len(), user_id);
        Ok(playlists)
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<SourcePlaylist> {
        let url = format!(
            "{}/playlists/{}",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        self.get_json(&url, &format!("Playlist {}", playlist_id)).await
    }
}
