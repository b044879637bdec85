use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error fetching source playlist: {0}")]
    SourceFetch(String),

    #[error("{0}")]
    Authorization(String),

    #[error("Token exchange failed: {0}")]
    AuthExchange(String),

    #[error("Authorization code rejected (codes are single-use): {0}")]
    InvalidGrant(String),

    #[error("Failed to fetch profile: {status}, {body}")]
    ProfileFetch { status: u16, body: String },

    #[error("Failed to create playlist: {status}, {body}")]
    PlaylistCreate { status: u16, body: String },

    #[error(
        "Error adding songs to playlist (batch {batch} of {total_batches}): {reason}; \
         {committed} songs from earlier batches remain in the playlist"
    )]
    PlaylistAppend {
        batch: usize,
        total_batches: usize,
        committed: usize,
        reason: String,
    },

    #[error("Failed to add tracks: {0}")]
    PlaylistAppendRequest(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("{0}")]
    Session(String),

    #[error("Spotify client error: {0}")]
    SpotifyApi(#[from] rspotify::ClientError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
