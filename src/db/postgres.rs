use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use super::{AccountDirectory, HistoryStore, TrackCatalog};
use crate::{
    error::{AppError, AppResult},
    models::{Artist, ArtistId, PlayEvent, Track, TrackId, UserId},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the schema in `migrations/`
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

const TRACK_COLUMNS: &str = "t.id, t.title, t.genre, t.play_count, t.duration_seconds, \
     a.id AS artist_id, a.name AS artist_name";

#[derive(Debug, FromRow)]
struct TrackRow {
    id: TrackId,
    title: String,
    genre: Option<String>,
    play_count: i64,
    duration_seconds: Option<i32>,
    artist_id: Option<ArtistId>,
    artist_name: Option<String>,
}

impl From<TrackRow> for Track {
    fn from(row: TrackRow) -> Self {
        Track {
            id: row.id,
            title: row.title,
            genre: row.genre,
            play_count: row.play_count,
            duration_seconds: row.duration_seconds,
            artist: resolve_artist(row.artist_id, row.artist_name),
        }
    }
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    track_id: TrackId,
    genre: Option<String>,
    artist_id: Option<ArtistId>,
    artist_name: Option<String>,
    played_at: DateTime<Utc>,
}

impl From<HistoryRow> for PlayEvent {
    fn from(row: HistoryRow) -> Self {
        PlayEvent {
            track_id: row.track_id,
            genre: row.genre,
            artist: resolve_artist(row.artist_id, row.artist_name),
            played_at: row.played_at,
        }
    }
}

/// LEFT JOINs yield both columns or neither
fn resolve_artist(id: Option<ArtistId>, name: Option<String>) -> Option<Artist> {
    match (id, name) {
        (Some(id), Some(name)) => Some(Artist { id, name }),
        _ => None,
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// PostgreSQL-backed accounts, history and catalog
#[derive(Clone)]
pub struct PgLibrary {
    pool: PgPool,
}

impl PgLibrary {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountDirectory for PgLibrary {
    async fn account_exists(&self, user_id: UserId) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait::async_trait]
impl HistoryStore for PgLibrary {
    async fn read_history(&self, user_id: UserId) -> AppResult<Vec<PlayEvent>> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            "SELECT h.track_id, t.genre, a.id AS artist_id, a.name AS artist_name, h.played_at \
             FROM play_history h \
             LEFT JOIN tracks t ON t.id = h.track_id \
             LEFT JOIN artists a ON a.id = t.artist_id \
             WHERE h.user_id = $1 \
             ORDER BY h.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, events = rows.len(), "Read play history");

        Ok(rows.into_iter().map(PlayEvent::from).collect())
    }

    async fn append_play(
        &self,
        user_id: UserId,
        track_id: TrackId,
        played_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps the user from being deleted before the insert lands
        let user: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE id = $1 FOR KEY SHARE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let updated = sqlx::query("UPDATE tracks SET play_count = play_count + 1 WHERE id = $1")
            .bind(track_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound(format!("Track {} not found", track_id)));
        }

        sqlx::query("INSERT INTO play_history (user_id, track_id, played_at) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(track_id)
            .bind(played_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrackCatalog for PgLibrary {
    async fn tracks_by_genre_excluding(
        &self,
        genre: &str,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>> {
        let sql = format!(
            "SELECT {} FROM tracks t \
             LEFT JOIN artists a ON a.id = t.artist_id \
             WHERE t.genre = $1 AND t.id <> ALL($2) \
             ORDER BY t.id \
             LIMIT $3",
            TRACK_COLUMNS
        );

        let rows: Vec<TrackRow> = sqlx::query_as(&sql)
            .bind(genre)
            .bind(exclude)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }

    async fn tracks_by_popularity_excluding(
        &self,
        exclude: &[TrackId],
        limit: usize,
    ) -> AppResult<Vec<Track>> {
        let sql = format!(
            "SELECT {} FROM tracks t \
             LEFT JOIN artists a ON a.id = t.artist_id \
             WHERE t.id <> ALL($1) \
             ORDER BY t.play_count DESC, t.id \
             LIMIT $2",
            TRACK_COLUMNS
        );

        let rows: Vec<TrackRow> = sqlx::query_as(&sql)
            .bind(exclude)
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Track::from).collect())
    }
}
