use serde::Serialize;

mod history;
mod insight;
mod track;

pub use history::{PlayEvent, RecordPlayRequest};
pub use insight::{ArtistCount, DayCount, Insight, InsightKind, ListeningInsights};
pub use track::{Artist, ArtistId, Track, TrackId};

/// Identifier of a user account
pub type UserId = uuid::Uuid;

/// Success envelope shared by all API responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
