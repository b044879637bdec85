//! In-memory catalogs for exercising the migration workflow without HTTP.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::source::{SourceCatalog, SourceEntry, SourcePlaylist, SourcePlaylistSummary, TrackRef};
use crate::spotify::models::track_uri;
use crate::spotify::{Credentials, DestinationCatalog, NewPlaylist, SpotifyPlaylist};

pub struct FakeSource {
    playlists: Vec<SourcePlaylist>,
}

impl FakeSource {
    pub fn with_playlist(id: &str, title: &str, tracks: Vec<SourceEntry>) -> Self {
        Self {
            playlists: vec![SourcePlaylist {
                id: id.to_string(),
                title: title.to_string(),
                tracks,
            }],
        }
    }

    pub fn add_playlist(mut self, id: &str, title: &str, tracks: Vec<SourceEntry>) -> Self {
        self.playlists.push(SourcePlaylist {
            id: id.to_string(),
            title: title.to_string(),
            tracks,
        });
        self
    }
}

#[async_trait]
impl SourceCatalog for FakeSource {
    async fn list_playlists(&self, _user_id: &str) -> Result<Vec<SourcePlaylistSummary>> {
        Ok(self
            .playlists
            .iter()
            .map(|p| SourcePlaylistSummary {
                id: p.id.clone(),
                title: p.title.clone(),
                track_count: Some(p.tracks.len()),
            })
            .collect())
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<SourcePlaylist> {
        self.playlists
            .iter()
            .find(|p| p.id == playlist_id)
            .cloned()
            .ok_or_else(|| AppError::SourceFetch(format!("Playlist {} not found", playlist_id)))
    }
}

#[derive(Debug, Clone, Copy)]
enum AppendFailure {
    Status,
    Transport,
}

#[derive(Debug, Clone)]
enum SearchBehavior {
    Found(String),
    Fail,
}

/// Destination fake that records every call and keeps committed playlist
/// contents, so tests can check what survived a partial failure.
#[derive(Default)]
pub struct FakeDestination {
    catalog: HashMap<(String, String), SearchBehavior>,
    fail_create: bool,
    fail_append_call: Option<(usize, AppendFailure)>,
    used_codes: Mutex<HashSet<String>>,
    pub searches: Mutex<Vec<TrackRef>>,
    pub created: Mutex<Vec<(String, NewPlaylist)>>,
    pub append_calls: Mutex<Vec<Vec<String>>>,
    pub playlists: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, title: &str, artist: &str, track_id: &str) -> Self {
        self.catalog.insert(
            (title.to_string(), artist.to_string()),
            SearchBehavior::Found(track_uri(track_id)),
        );
        self
    }

    pub fn with_failing_search(mut self, title: &str, artist: &str) -> Self {
        self.catalog
            .insert((title.to_string(), artist.to_string()), SearchBehavior::Fail);
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make the n-th append call (1-based) fail with a 500.
    pub fn failing_append_call(mut self, call: usize) -> Self {
        self.fail_append_call = Some((call, AppendFailure::Status));
        self
    }

    /// Make the n-th append call (1-based) fail before reaching the server.
    pub fn failing_append_transport(mut self, call: usize) -> Self {
        self.fail_append_call = Some((call, AppendFailure::Transport));
        self
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn append_call_sizes(&self) -> Vec<usize> {
        self.append_calls
            .lock()
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect()
    }

    pub fn playlist_contents(&self, playlist_id: &str) -> Vec<String> {
        self.playlists
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DestinationCatalog for FakeDestination {
    async fn exchange_code_for_token(&self, code: &str) -> Result<Credentials> {
        if !self.used_codes.lock().unwrap().insert(code.to_string()) {
            return Err(AppError::InvalidGrant(
                r#"{"error": "invalid_grant"}"#.to_string(),
            ));
        }
        Ok(Credentials::mock())
    }

    async fn fetch_identity(&self, _credentials: &Credentials) -> Result<String> {
        Ok("dest-user".to_string())
    }

    async fn search_track(
        &self,
        _credentials: &Credentials,
        track: &TrackRef,
    ) -> Result<Option<String>> {
        self.searches.lock().unwrap().push(track.clone());

        match self
            .catalog
            .get(&(track.title.clone(), track.artist.clone()))
        {
            Some(SearchBehavior::Found(uri)) => Ok(Some(uri.clone())),
            Some(SearchBehavior::Fail) => Err(AppError::Search("503, unavailable".to_string())),
            None => Ok(None),
        }
    }

    async fn create_playlist(
        &self,
        _credentials: &Credentials,
        owner_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<SpotifyPlaylist> {
        if self.fail_create {
            return Err(AppError::PlaylistCreate {
                status: 403,
                body: "forbidden".to_string(),
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push((owner_id.to_string(), playlist.clone()));
        let id = format!("playlist-{}", created.len());
        self.playlists.lock().unwrap().insert(id.clone(), Vec::new());

        Ok(SpotifyPlaylist {
            id,
            name: playlist.name.clone(),
        })
    }

    async fn add_tracks_to_playlist(
        &self,
        _credentials: &Credentials,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()> {
        let call = {
            let mut calls = self.append_calls.lock().unwrap();
            calls.push(uris.to_vec());
            calls.len()
        };

        match self.fail_append_call {
            Some((n, AppendFailure::Status)) if n == call => {
                return Err(AppError::PlaylistAppendRequest(
                    "500, internal error".to_string(),
                ));
            }
            Some((n, AppendFailure::Transport)) if n == call => {
                let err = reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .unwrap_err();
                return Err(AppError::Http(err));
            }
            _ => {}
        }

        self.playlists
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .extend(uris.iter().cloned());
        Ok(())
    }
}
