use serde::{Deserialize, Serialize};

use crate::spotify::{MatchResult, SpotifyPlaylist};

/// Misses listed verbatim before collapsing into "... and N more".
const LISTED_MISSES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub playlist: SpotifyPlaylist,
    pub matches: Vec<MatchResult>,
    pub migrated: usize,
}

impl MigrationReport {
    pub fn new(playlist: SpotifyPlaylist, matches: Vec<MatchResult>, migrated: usize) -> Self {
        Self {
            playlist,
            matches,
            migrated,
        }
    }

    pub fn not_found_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_not_found()).count()
    }

    pub fn lookup_failed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_lookup_failed()).count()
    }

    pub fn summary(&self) -> String {
        summarize(&self.playlist, self.migrated, &self.matches)
    }
}

pub fn summarize(playlist: &SpotifyPlaylist, migrated: usize, matches: &[MatchResult]) -> String {
    let mut lines = Vec::new();

    if migrated > 0 {
        lines.push(format!("Successfully migrated {} songs!", migrated));
    }

    let not_found: Vec<_> = matches.iter().filter(|m| m.is_not_found()).collect();
    if !not_found.is_empty() {
        lines.push(format!(
            "Could not find {} songs on Spotify:",
            not_found.len()
        ));
        push_listing(&mut lines, &not_found);
    }

    let failed: Vec<_> = matches.iter().filter(|m| m.is_lookup_failed()).collect();
    if !failed.is_empty() {
        lines.push(format!("Search failed for {} songs:", failed.len()));
        push_listing(&mut lines, &failed);
    }

    lines.push(format!("Playlist: {} ({})", playlist.name, playlist.id));
    lines.join("\n")
}

fn push_listing(lines: &mut Vec<String>, results: &[&MatchResult]) {
    lines.extend(
        results
            .iter()
            .take(LISTED_MISSES)
            .map(|m| format!("- {}", m.source)),
    );
    if results.len() > LISTED_MISSES {
        lines.push(format!("... and {} more", results.len() - LISTED_MISSES));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TrackRef;
    use crate::spotify::MatchOutcome;

    fn playlist() -> SpotifyPlaylist {
        SpotifyPlaylist {
            id: "playlist-1".to_string(),
            name: "Road Trip".to_string(),
        }
    }

    #[test]
    fn test_twelve_misses_list_ten_and_overflow() {
        let matches: Vec<_> = (1..=12)
            .map(|i| MatchResult::not_found(&format!("Song {}", i), "Artist"))
            .collect();

        let report = summarize(&playlist(), 0, &matches);
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "Could not find 12 songs on Spotify:");
        assert_eq!(lines.iter().filter(|l| l.starts_with("- ")).count(), 10);
        assert_eq!(lines[1], "- Song 1 - Artist");
        assert_eq!(lines[10], "- Song 10 - Artist");
        assert_eq!(lines[11], "... and 2 more");
        assert!(!report.contains("Successfully migrated"));
    }

    #[test]
    fn test_success_line_then_misses() {
        let matches = vec![
            MatchResult::matched("Jazz", "Queen", "jazz"),
            MatchResult::not_found("Missing", "Nobody"),
            MatchResult::matched("Bohemian Rhapsody", "Queen", "bohemian"),
        ];

        let report = summarize(&playlist(), 2, &matches);

        assert_eq!(
            report,
            "Successfully migrated 2 songs!\n\
             Could not find 1 songs on Spotify:\n\
             - Missing - Nobody\n\
             Playlist: Road Trip (playlist-1)"
        );
    }

    #[test]
    fn test_lookup_failures_listed_separately() {
        let matches = vec![
            MatchResult::matched("Jazz", "Queen", "jazz"),
            MatchResult {
                source: TrackRef::new("Flaky", "Artist"),
                outcome: MatchOutcome::LookupFailed("timeout".to_string()),
            },
        ];

        let report = MigrationReport::new(playlist(), matches, 1);

        assert_eq!(report.not_found_count(), 0);
        assert_eq!(report.lookup_failed_count(), 1);
        assert!(!report.summary().contains("Could not find"));
        assert!(report.summary().contains("Search failed for 1 songs:\n- Flaky - Artist"));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let matches = vec![
            MatchResult::not_found("A", "B"),
            MatchResult::matched("C", "D", "cd"),
        ];

        assert_eq!(
            summarize(&playlist(), 1, &matches),
            summarize(&playlist(), 1, &matches)
        );
    }
}
