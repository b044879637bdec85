pub mod client;
pub mod models;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;

pub use client::SourceClient;
pub use models::{SourceEntry, SourcePlaylist, SourcePlaylistSummary, TrackRef};

/// Read-only access to the catalog a playlist is migrated from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn list_playlists(&self, user_id: &str) -> Result<Vec<SourcePlaylistSummary>>;

    async fn get_playlist(&self, playlist_id: &str) -> Result<SourcePlaylist>;
}

/// Fetch a source playlist and reduce it to (title, primary artist) pairs,
/// keeping source order.
pub async fn extract_tracks<S: SourceCatalog + ?Sized>(
    source: &S,
    user_id: &str,
    playlist_id: &str,
) -> Result<Vec<TrackRef>> {
    let playlist = source.get_playlist(playlist_id).await?;

    let tracks: Vec<TrackRef> = playlist
        .tracks
        .iter()
        .filter_map(|entry| {
            let track = TrackRef::from_entry(entry);
            if track.is_none() {
                debug!("Skipping entry without title or artist: {:?}", entry.title);
            }
            track
        })
        .collect();

    info!(
        "Extracted {} of {} entries from playlist {} ({}) for user {}",
        tracks.len(),
        playlist.tracks.len(),
        playlist.title,
        playlist_id,
        user_id
    );

    Ok(tracks)
}
