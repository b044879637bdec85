use serde::{Deserialize, Serialize};

/// A (title, primary artist) pair extracted from a source playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub title: String,
    pub artist: String,
}

impl TrackRef {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Keeps an entry only when it has a title and a named first artist.
    pub fn from_entry(entry: &SourceEntry) -> Option<Self> {
        let title = entry.title.as_deref().filter(|t| !t.is_empty())?;
        let artist = entry
            .artists
            .as_ref()?
            .first()?
            .name
            .as_deref()
            .filter(|a| !a.is_empty())?;

        Some(Self::new(title, artist))
    }
}

impl std::fmt::Display for TrackRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePlaylistSummary {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "count")]
    pub track_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcePlaylist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tracks: Vec<SourceEntry>,
}

/// Raw playlist entry as the source catalog returns it. Any field may be
/// missing (uploads, unavailable videos, podcasts).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceEntry {
    pub title: Option<String>,
    pub artists: Option<Vec<SourceArtist>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceArtist {
    pub name: Option<String>,
}

#[cfg(test)]
impl SourceEntry {
    pub fn mock(title: Option<&str>, artists: &[&str]) -> Self {
        Self {
            title: title.map(str::to_string),
            artists: Some(
                artists
                    .iter()
                    .map(|name| SourceArtist {
                        name: Some(name.to_string()),
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_artist_is_primary() {
        let entry = SourceEntry::mock(Some("Under Pressure"), &["Queen", "David Bowie"]);
        assert_eq!(
            TrackRef::from_entry(&entry),
            Some(TrackRef::new("Under Pressure", "Queen"))
        );
    }

    #[test]
    fn test_entries_missing_title_or_artist_dropped() {
        assert_eq!(TrackRef::from_entry(&SourceEntry::mock(None, &["Queen"])), None);
        assert_eq!(TrackRef::from_entry(&SourceEntry::mock(Some(""), &["Queen"])), None);
        assert_eq!(TrackRef::from_entry(&SourceEntry::mock(Some("Song"), &[])), None);
        assert_eq!(TrackRef::from_entry(&SourceEntry::mock(Some("Song"), &[""])), None);
        assert_eq!(TrackRef::from_entry(&SourceEntry::default()), None);
    }

    #[test]
    fn test_display_matches_report_format() {
        assert_eq!(TrackRef::new("Jazz", "Queen").to_string(), "Jazz - Queen");
    }
}
