pub mod orchestrator;
pub mod report;
pub mod session;
pub mod writer;

pub use orchestrator::PlaylistMigrator;
pub use report::{MigrationReport, summarize};
pub use session::{Identity, MigrationSession, SelectedPlaylist};
