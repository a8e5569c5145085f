use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Artist, TrackId};

/// One recorded instance of a user playing a track
///
/// Track and artist metadata are resolved at read time, so `genre` and
/// `artist` are `None` when the track is untagged or the referenced
/// track/artist has since been deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayEvent {
    pub track_id: TrackId,
    pub genre: Option<String>,
    pub artist: Option<Artist>,
    pub played_at: DateTime<Utc>,
}

/// Body of the play-tracking signal
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPlayRequest {
    pub track_id: TrackId,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}
