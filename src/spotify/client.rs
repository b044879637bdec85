use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rspotify::{AuthCodeSpotify, Config as RspotifyConfig, OAuth, scopes};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::source::TrackRef;
use crate::spotify::DestinationCatalog;
use crate::spotify::models::{Credentials, NewPlaylist, SpotifyPlaylist, track_uri};

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<ApiTrack>,
}

#[derive(Debug, Deserialize)]
struct ApiTrack {
    id: String,
}

pub struct SpotifyClient {
    http_client: Client,
    api_url: String,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http_client,
            api_url: config.spotify_api_url.trim_end_matches('/').to_string(),
            accounts_url: config.spotify_accounts_url.trim_end_matches('/').to_string(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
        })
    }

    /// URL the user opens to grant the migrator access to their account.
    pub fn authorize_url(&self) -> Result<String> {
        let creds = rspotify::Credentials::new(&self.client_id, &self.client_secret);

        let oauth = OAuth {
            redirect_uri: self.redirect_uri.clone(),
            scopes: scopes!(
                "user-read-private",
                "user-read-email",
                "playlist-read-private",
                "playlist-modify-private",
                "playlist-modify-public"
            ),
            ..Default::default()
        };

        let rspotify_config = RspotifyConfig {
            auth_base_url: format!("{}/", self.accounts_url),
            ..Default::default()
        };

        let auth = AuthCodeSpotify::with_config(creds, oauth, rspotify_config);
        Ok(auth.get_authorize_url(false)?)
    }
}

/// Pull the authorization code out of the URL Spotify redirected to.
pub fn parse_callback(redirect_url: &str) -> Result<String> {
    let url = Url::parse(redirect_url.trim())
        .map_err(|e| AppError::Authorization(format!("Invalid redirect URL: {}", e)))?;

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => {
                return Err(AppError::Authorization(format!(
                    "Authorization failed: {}",
                    value
                )));
            }
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| AppError::Authorization("No authorization code received".into()))
}

#[async_trait]
impl DestinationCatalog for SpotifyClient {
    async fn exchange_code_for_token(&self, code: &str) -> Result<Credentials> {
        let response = self
            .http_client
            .post(format!("{}/api/token", self.accounts_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::AuthExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let invalid_grant = status == StatusCode::BAD_REQUEST
                && serde_json::from_str::<OAuthErrorBody>(&error_text)
                    .map(|body| body.error == "invalid_grant")
                    .unwrap_or(false);

            return Err(if invalid_grant {
                AppError::InvalidGrant(error_text)
            } else {
                AppError::AuthExchange(error_text)
            });
        }

        let credentials: Credentials = response
            .json()
            .await
            .map_err(|e| AppError::AuthExchange(format!("Failed to parse token response: {}", e)))?;

        info!("Exchanged authorization code for Spotify access token");
        Ok(credentials)
    }

    async fn fetch_identity(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .http_client
            .get(format!("{}/me", self.api_url))
            .bearer_auth(&credentials.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProfileFetch {
                status: status.as_u16(),
                body,
            });
        }

        let profile: ProfileResponse = response.json().await?;
        info!("Successfully authenticated as Spotify user: {}", profile.id);

        Ok(profile.id)
    }

    async fn search_track(
        &self,
        credentials: &Credentials,
        track: &TrackRef,
    ) -> Result<Option<String>> {
        let query = format!("track:{} artist:{}", track.title, track.artist);

        let response = self
            .http_client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(&credentials.access_token)
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Spotify search failed ({}): {}", status, error_text);
            return Err(AppError::Search(format!("{}, {}", status.as_u16(), error_text)));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        let uri = search
            .tracks
            .and_then(|page| page.items.into_iter().next())
            .map(|item| track_uri(&item.id));

        debug!("Search '{}' -> {:?}", query, uri);
        Ok(uri)
    }

    async fn create_playlist(
        &self,
        credentials: &Credentials,
        owner_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<SpotifyPlaylist> {
        let url = format!(
            "{}/users/{}/playlists",
            self.api_url,
            urlencoding::encode(owner_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&credentials.access_token)
            .json(playlist)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PlaylistCreate {
                status: status.as_u16(),
                body,
            });
        }

        let created: SpotifyPlaylist = response.json().await?;
        info!("Created Spotify playlist: {} ({})", created.name, created.id);

        Ok(created)
    }

    async fn add_tracks_to_playlist(
        &self,
        credentials: &Credentials,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.api_url,
            urlencoding::encode(playlist_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&credentials.access_token)
            .json(&serde_json::json!({ "uris": uris }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::PlaylistAppendRequest(format!(
                "{}, {}",
                status.as_u16(),
                error_text
            )));
        }

        debug!("Added {} tracks to playlist {}", uris.len(), playlist_id);
        Ok(())
    }
}
