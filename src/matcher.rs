use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::source::TrackRef;
use crate::spotify::{Credentials, DestinationCatalog, MatchOutcome, MatchResult};

/// Look up every track on the destination, one search at a time.
///
/// The destination's top-ranked result is trusted as-is. Produces exactly one
/// result per input, in input order. Repeated (title, artist) pairs are
/// searched again; a failed search becomes `LookupFailed` rather than a miss.
pub async fn match_tracks<D: DestinationCatalog + ?Sized>(
    destination: &D,
    credentials: &Credentials,
    tracks: &[TrackRef],
    progress: &ProgressBar,
) -> Vec<MatchResult> {
    let mut results = Vec::with_capacity(tracks.len());

    for track in tracks {
        progress.set_message(track.to_string());

        let outcome = match destination.search_track(credentials, track).await {
            Ok(Some(uri)) => MatchOutcome::Matched(uri),
            Ok(None) => {
                debug!("No match found for track: {}", track);
                MatchOutcome::NotFound
            }
            Err(e) => {
                warn!("Search failed for {}: {}", track, e);
                MatchOutcome::LookupFailed(e.to_string())
            }
        };

        results.push(MatchResult {
            source: track.clone(),
            outcome,
        });
        progress.inc(1);
    }

    results
}
