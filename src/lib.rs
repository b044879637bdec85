pub mod config;
pub mod error;
pub mod matcher;
pub mod migrator;
pub mod source;
pub mod spotify;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{AppError, Result};
pub use migrator::{MigrationReport, MigrationSession, PlaylistMigrator};
pub use source::{SourceCatalog, SourceClient, TrackRef};
pub use spotify::{Credentials, DestinationCatalog, MatchOutcome, MatchResult, SpotifyClient};
