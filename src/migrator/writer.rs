use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::migrator::session::Identity;
use crate::spotify::{DestinationCatalog, NewPlaylist, SpotifyPlaylist};

/// Spotify accepts at most 100 track URIs per add-items request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

pub async fn create_playlist<D: DestinationCatalog + ?Sized>(
    destination: &D,
    identity: &Identity,
    playlist: &NewPlaylist,
) -> Result<SpotifyPlaylist> {
    destination
        .create_playlist(&identity.credentials, &identity.user_id, playlist)
        .await
}

/// Append `uris` in order, one request per batch of up to 100.
///
/// Batches are not rolled back: when batch `n` fails, batches `1..n` stay in
/// the playlist and the error reports how many tracks were committed.
/// Returns the number of tracks added.
pub async fn append_tracks<D: DestinationCatalog + ?Sized>(
    destination: &D,
    identity: &Identity,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize> {
    let total_batches = uris.len().div_ceil(MAX_TRACKS_PER_REQUEST);
    let mut committed = 0;

    for (i, batch) in uris.chunks(MAX_TRACKS_PER_REQUEST).enumerate() {
        if let Err(e) = destination
            .add_tracks_to_playlist(&identity.credentials, playlist_id, batch)
            .await
        {
            warn!(
                "Failed to add batch {}/{} to playlist {}: {}",
                i + 1,
                total_batches,
                playlist_id,
                e
            );

            let reason = match e {
                AppError::PlaylistAppendRequest(reason) => reason,
                other => other.to_string(),
            };
            return Err(AppError::PlaylistAppend {
                batch: i + 1,
                total_batches,
                committed,
                reason,
            });
        }

        committed += batch.len();
        info!(
            "Added batch {}/{} ({} tracks) to playlist {}",
            i + 1,
            total_batches,
            batch.len(),
            playlist_id
        );
    }

    Ok(committed)
}
