use serde::{Deserialize, Serialize};

/// Identifier of a track in the catalog
pub type TrackId = i64;

/// Identifier of an artist in the catalog
pub type ArtistId = i64;

/// Artist as embedded in track payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}

/// Represents a catalog track with its artist embedded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique identifier for the track
    pub id: TrackId,
    pub title: String,
    /// Genre tag, absent for untagged tracks
    pub genre: Option<String>,
    /// Global number of plays across all users
    pub play_count: i64,
    pub duration_seconds: Option<i32>,
    /// `None` once the artist record has been deleted
    pub artist: Option<Artist>,
}
