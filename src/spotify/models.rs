use serde::{Deserialize, Serialize};

use crate::source::TrackRef;

/// Bearer credentials returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl NewPlaylist {
    /// Migrated playlists are always created private.
    pub fn private(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            public: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Spotify track URI (`spotify:track:<id>`).
    Matched(String),
    NotFound,
    /// The search call itself failed; nothing is known about the track.
    LookupFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub source: TrackRef,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn track_uri(&self) -> Option<&str> {
        match &self.outcome {
            MatchOutcome::Matched(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.outcome == MatchOutcome::NotFound
    }

    pub fn is_lookup_failed(&self) -> bool {
        matches!(self.outcome, MatchOutcome::LookupFailed(_))
    }
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

#[cfg(test)]
impl Credentials {
    pub fn mock() -> Self {
        Self {
            access_token: "mock-access-token".to_string(),
            refresh_token: Some("mock-refresh-token".to_string()),
            token_type: "Bearer".to_string(),
        }
    }
}

#[cfg(test)]
impl MatchResult {
    pub fn matched(title: &str, artist: &str, track_id: &str) -> Self {
        Self {
            source: TrackRef::new(title, artist),
            outcome: MatchOutcome::Matched(track_uri(track_id)),
        }
    }

    pub fn not_found(title: &str, artist: &str) -> Self {
        Self {
            source: TrackRef::new(title, artist),
            outcome: MatchOutcome::NotFound,
        }
    }
}
