pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::source::TrackRef;

pub use client::{SpotifyClient, parse_callback};
pub use models::{Credentials, MatchOutcome, MatchResult, NewPlaylist, SpotifyPlaylist};

/// The catalog a playlist is migrated to. Every call is a single request;
/// batching and sequencing live in the callers.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn exchange_code_for_token(&self, code: &str) -> Result<Credentials>;

    async fn fetch_identity(&self, credentials: &Credentials) -> Result<String>;

    /// Top-ranked track URI for the query, `None` when the search is empty.
    async fn search_track(
        &self,
        credentials: &Credentials,
        track: &TrackRef,
    ) -> Result<Option<String>>;

    async fn create_playlist(
        &self,
        credentials: &Credentials,
        owner_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<SpotifyPlaylist>;

    async fn add_tracks_to_playlist(
        &self,
        credentials: &Credentials,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()>;
}
