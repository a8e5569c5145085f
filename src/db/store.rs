//! Collaborator contracts consumed by the analytics core
//!
//! The core only reads through these traits. Implementations own storage
//! schema, connection handling and consistency; a read may or may not reflect
//! an append that races with it.

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{PlayEvent, Track, TrackId, UserId},
};

/// Lookup of user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Whether an account with this id exists
    async fn account_exists(&self, user_id: UserId) -> AppResult<bool>;
}

/// Per-user append-only play log
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Full history for a user, oldest first, in insertion order
    ///
    /// Track and artist metadata are resolved; references to deleted records
    /// come back as `None`.
    async fn read_history(&self, user_id: UserId) -> AppResult<Vec<PlayEvent>>;

    /// Appends a play and bumps the track's global play count
    ///
    /// Fails with `NotFound` when the track does not exist.
    async fn append_play(
        &self,
        user_id: UserId,
        track_id: TrackId,
        played_at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Queryable track collection
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Tracks tagged `genre` whose id is not in `exclude`, ascending by id
    async fn tracks_by_genre_excluding(
        &self,
        genre: &str,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>>;

    /// Tracks whose id is not in `exclude`, by descending global play count
    ///
    /// Equal play counts are ordered by ascending id.
    async fn tracks_by_popularity_excluding(
        &self,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>>;
}
