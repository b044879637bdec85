use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::matcher::match_tracks;
use crate::migrator::report::MigrationReport;
use crate::migrator::session::MigrationSession;
use crate::migrator::writer;
use crate::source::{SourceCatalog, SourceClient, SourcePlaylistSummary, extract_tracks};
use crate::spotify::{DestinationCatalog, NewPlaylist, SpotifyClient};

/// Drives one migration through its steps. Each step reads and updates the
/// caller's `MigrationSession`; nothing is shared between sessions.
pub struct PlaylistMigrator<S, D> {
    source: S,
    destination: D,
    source_name: String,
    show_progress: bool,
}

impl PlaylistMigrator<SourceClient, SpotifyClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = SourceClient::new(config)?;
        let destination = SpotifyClient::new(config)?;

        Ok(Self::new(source, destination, &config.source_name))
    }
}

impl<S: SourceCatalog, D: DestinationCatalog> PlaylistMigrator<S, D> {
    pub fn new(source: S, destination: D, source_name: &str) -> Self {
        Self {
            source,
            destination,
            source_name: source_name.to_string(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub async fn list_playlists(
        &self,
        session: &MigrationSession,
    ) -> Result<Vec<SourcePlaylistSummary>> {
        self.source.list_playlists(session.source_user_id()).await
    }

    /// Select one of the user's playlists and extract its tracks into the
    /// session.
    pub async fn select_playlist(
        &self,
        session: &mut MigrationSession,
        playlist_id: &str,
    ) -> Result<usize> {
        let playlists = self.list_playlists(session).await?;
        let selected = playlists
            .into_iter()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| {
                AppError::SourceFetch(format!(
                    "Playlist {} not found for user {}",
                    playlist_id,
                    session.source_user_id()
                ))
            })?;

        session.select_playlist(&selected.id, &selected.title);
        self.load_tracks(session).await
    }

    pub async fn load_tracks(&self, session: &mut MigrationSession) -> Result<usize> {
        let playlist_id = session.playlist()?.id.clone();
        let tracks = extract_tracks(&self.source, session.source_user_id(), &playlist_id).await?;
        let count = tracks.len();

        session.store_tracks(&playlist_id, tracks)?;
        Ok(count)
    }

    /// Exchange the authorization code and resolve the Spotify account.
    pub async fn authenticate(&self, session: &mut MigrationSession, code: &str) -> Result<()> {
        let credentials = self.destination.exchange_code_for_token(code).await?;
        let user_id = self.destination.fetch_identity(&credentials).await?;

        session.authenticate(user_id, credentials);
        Ok(())
    }

    /// Create the destination playlist, match every extracted track, then
    /// append the matches. A failed append batch ends the migration with
    /// `AppError::PlaylistAppend`; earlier batches stay in the playlist.
    pub async fn migrate(&self, session: &mut MigrationSession) -> Result<MigrationReport> {
        let playlist = session.playlist()?.clone();
        let tracks = session.tracks()?.to_vec();
        let identity = session.identity()?.clone();

        info!(
            "Migrating playlist: {} ({} tracks) to Spotify user {}",
            playlist.title,
            tracks.len(),
            identity.user_id
        );

        let description = format!("Playlist migrated from {}", self.source_name);
        let created = writer::create_playlist(
            &self.destination,
            &identity,
            &NewPlaylist::private(&playlist.title, description),
        )
        .await?;
        session.set_destination_playlist(&created.id);

        let pb = self.progress_bar(tracks.len());
        let matches = match_tracks(&self.destination, &identity.credentials, &tracks, &pb).await;
        pb.finish_and_clear();

        let uris: Vec<String> = matches
            .iter()
            .filter_map(|m| m.track_uri().map(str::to_string))
            .collect();

        let migrated = writer::append_tracks(&self.destination, &identity, &created.id, &uris).await?;

        let report = MigrationReport::new(created, matches, migrated);
        info!(
            "Playlist migration completed: {} - {}/{} tracks migrated, {} not found, {} lookups failed",
            playlist.title,
            report.migrated,
            tracks.len(),
            report.not_found_count(),
            report.lookup_failed_count()
        );

        Ok(report)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
