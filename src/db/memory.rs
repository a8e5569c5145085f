use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountDirectory, HistoryStore, TrackCatalog};
use crate::{
    error::{AppError, AppResult},
    models::{Artist, ArtistId, PlayEvent, Track, TrackId, UserId},
};

/// Track fields supplied when seeding the catalog
#[derive(Debug, Clone, Default)]
pub struct NewTrack {
    pub title: String,
    pub genre: Option<String>,
    pub artist_id: Option<ArtistId>,
    pub play_count: i64,
    pub duration_seconds: Option<i32>,
}

impl NewTrack {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn artist(mut self, artist_id: ArtistId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    pub fn play_count(mut self, play_count: i64) -> Self {
        self.play_count = play_count;
        self
    }
}

struct StoredPlay {
    track_id: TrackId,
    played_at: DateTime<Utc>,
}

#[derive(Default)]
struct LibraryInner {
    users: HashSet<UserId>,
    artists: HashMap<ArtistId, String>,
    tracks: BTreeMap<TrackId, NewTrack>,
    history: HashMap<UserId, Vec<StoredPlay>>,
    next_id: i64,
}

impl LibraryInner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn artist(&self, artist_id: Option<ArtistId>) -> Option<Artist> {
        artist_id.and_then(|id| {
            self.artists.get(&id).map(|name| Artist {
                id,
                name: name.clone(),
            })
        })
    }

    fn track(&self, id: TrackId, stored: &NewTrack) -> Track {
        Track {
            id,
            title: stored.title.clone(),
            genre: stored.genre.clone(),
            play_count: stored.play_count,
            duration_seconds: stored.duration_seconds,
            artist: self.artist(stored.artist_id),
        }
    }
}

/// In-process accounts, history and catalog
///
/// Behaves like the PostgreSQL implementation, including dangling
/// references after deletes. Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct MemoryLibrary {
    inner: Arc<RwLock<LibraryInner>>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account with an empty history
    pub async fn add_user(&self) -> UserId {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write().await;
        inner.users.insert(id);
        inner.history.insert(id, Vec::new());
        id
    }

    pub async fn add_artist(&self, name: impl Into<String>) -> ArtistId {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        inner.artists.insert(id, name.into());
        id
    }

    pub async fn add_track(&self, track: NewTrack) -> TrackId {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        inner.tracks.insert(id, track);
        id
    }

    /// Removes an artist, leaving its tracks with a dangling reference
    pub async fn delete_artist(&self, artist_id: ArtistId) {
        self.inner.write().await.artists.remove(&artist_id);
    }

    /// Removes a track, leaving history entries that point at it
    pub async fn delete_track(&self, track_id: TrackId) {
        self.inner.write().await.tracks.remove(&track_id);
    }
}

#[async_trait::async_trait]
impl AccountDirectory for MemoryLibrary {
    async fn account_exists(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.inner.read().await.users.contains(&user_id))
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryLibrary {
    async fn read_history(&self, user_id: UserId) -> AppResult<Vec<PlayEvent>> {
        let inner = self.inner.read().await;
        let plays = match inner.history.get(&user_id) {
            Some(plays) => plays,
            None => return Ok(Vec::new()),
        };

        let events = plays
            .iter()
            .map(|play| {
                let track = inner.tracks.get(&play.track_id);
                PlayEvent {
                    track_id: play.track_id,
                    genre: track.and_then(|t| t.genre.clone()),
                    artist: track.and_then(|t| inner.artist(t.artist_id)),
                    played_at: play.played_at,
                }
            })
            .collect();

        Ok(events)
    }

    async fn append_play(
        &self,
        user_id: UserId,
        track_id: TrackId,
        played_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains(&user_id) {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let track = inner
            .tracks
            .get_mut(&track_id)
            .ok_or_else(|| AppError::NotFound(format!("Track {} not found", track_id)))?;
        track.play_count += 1;

        inner
            .history
            .entry(user_id)
            .or_default()
            .push(StoredPlay {
                track_id,
                played_at,
            });

        Ok(())
    }
}

#[async_trait::async_trait]
impl TrackCatalog for MemoryLibrary {
    async fn tracks_by_genre_excluding(
        &self,
        genre: &str,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>> {
        let inner = self.inner.read().await;
        let exclude: HashSet<TrackId> = exclude.iter().copied().collect();

        // BTreeMap iteration is already ascending by id
        let tracks = inner
            .tracks
            .iter()
            .filter(|(id, t)| !exclude.contains(*id) && t.genre.as_deref() == Some(genre))
            .take(limit)
            .map(|(id, t)| inner.track(*id, t))
            .collect();

        Ok(tracks)
    }

    async fn tracks_by_popularity_excluding(
        &self,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>> {
        let inner = self.inner.read().await;
        let exclude: HashSet<TrackId> = exclude.iter().copied().collect();

        let mut candidates: Vec<(&TrackId, &NewTrack)> = inner
            .tracks
            .iter()
            .filter(|(id, _)| !exclude.contains(*id))
            .collect();
        candidates.sort_by_key(|(id, t)| (Reverse(t.play_count), **id));

        Ok(candidates
            .into_iter()
            .take(limit)
            .map(|(id, t)| inner.track(*id, t))
            .collect())
    }
}
