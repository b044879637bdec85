use crate::error::{AppError, Result};
use crate::source::TrackRef;
use crate::spotify::Credentials;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPlaylist {
    pub id: String,
    pub title: String,
}

/// Resolved destination account. Outside this crate it is only obtainable
/// through a session that has completed the token exchange and profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub(crate) user_id: String,
    pub(crate) credentials: Credentials,
}

impl Identity {
    pub(crate) fn new(user_id: String, credentials: Credentials) -> Self {
        Self {
            user_id,
            credentials,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[derive(Debug, Clone)]
struct ExtractedTracks {
    playlist_id: String,
    tracks: Vec<TrackRef>,
}

/// State for one end-to-end migration. Lives in memory only; each step reads
/// what the previous step stored and rejects the call if it is missing.
#[derive(Debug, Clone)]
pub struct MigrationSession {
    source_user_id: String,
    playlist: Option<SelectedPlaylist>,
    extracted: Option<ExtractedTracks>,
    identity: Option<Identity>,
    destination_playlist_id: Option<String>,
}

impl MigrationSession {
    pub fn new(source_user_id: &str) -> Result<Self> {
        let source_user_id = source_user_id.trim();
        if source_user_id.is_empty() {
            return Err(AppError::Session("Please enter a valid user ID".into()));
        }

        Ok(Self {
            source_user_id: source_user_id.to_string(),
            playlist: None,
            extracted: None,
            identity: None,
            destination_playlist_id: None,
        })
    }

    pub fn source_user_id(&self) -> &str {
        &self.source_user_id
    }

    /// Selecting a playlist discards tracks extracted for any earlier one.
    pub fn select_playlist(&mut self, id: &str, title: &str) {
        self.playlist = Some(SelectedPlaylist {
            id: id.to_string(),
            title: title.to_string(),
        });
        self.extracted = None;
        self.destination_playlist_id = None;
    }

    pub fn playlist(&self) -> Result<&SelectedPlaylist> {
        self.playlist
            .as_ref()
            .ok_or_else(|| AppError::Session("No source playlist selected".into()))
    }

    pub fn store_tracks(&mut self, playlist_id: &str, tracks: Vec<TrackRef>) -> Result<()> {
        let selected = self.playlist()?;
        if selected.id != playlist_id {
            return Err(AppError::Session(format!(
                "Tracks belong to playlist {}, but {} is selected",
                playlist_id, selected.id
            )));
        }

        self.extracted = Some(ExtractedTracks {
            playlist_id: playlist_id.to_string(),
            tracks,
        });
        Ok(())
    }

    /// Tracks extracted for the currently selected playlist.
    pub fn tracks(&self) -> Result<&[TrackRef]> {
        let selected = self.playlist()?;
        let extracted = self
            .extracted
            .as_ref()
            .filter(|e| e.playlist_id == selected.id)
            .ok_or_else(|| {
                AppError::Session(format!("Tracks for playlist {} were not extracted", selected.id))
            })?;

        if extracted.tracks.is_empty() {
            return Err(AppError::Session("No songs to migrate".into()));
        }
        Ok(&extracted.tracks)
    }

    pub fn authenticate(&mut self, user_id: String, credentials: Credentials) {
        self.identity = Some(Identity::new(user_id, credentials));
    }

    pub fn identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::Session("Not authenticated with Spotify".into()))
    }

    pub fn set_destination_playlist(&mut self, playlist_id: &str) {
        self.destination_playlist_id = Some(playlist_id.to_string());
    }

    pub fn destination_playlist_id(&self) -> Option<&str> {
        self.destination_playlist_id.as_deref()
    }
}
