use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{
    db::{AccountDirectory, HistoryStore, TrackCatalog},
    error::{AppError, AppResult},
    models::{ListeningInsights, PlayEvent, RecordPlayRequest, Track, UserId},
};

use super::{
    artist_frequency::rank_artists,
    genre_affinity::extract_genre_affinity,
    insights::generate_insights,
    recommendations::{played_track_ids, recommend_tracks},
    weekly_pattern::WeeklyPattern,
};

/// Listening-history analytics for one caller at a time
///
/// Every call re-reads the full history and recomputes from scratch; nothing
/// is cached between requests, so concurrent calls share no mutable state.
#[derive(Clone)]
pub struct ListeningAnalytics {
    accounts: Arc<dyn AccountDirectory>,
    history: Arc<dyn HistoryStore>,
    catalog: Arc<dyn TrackCatalog>,
}

impl ListeningAnalytics {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        history: Arc<dyn HistoryStore>,
        catalog: Arc<dyn TrackCatalog>,
    ) -> Self {
        Self {
            accounts,
            history,
            catalog,
        }
    }

    /// Ranked list of at most ten unplayed tracks
    pub async fn recommendations(&self, user_id: UserId) -> AppResult<Vec<Track>> {
        let start = Instant::now();
        let history = self.load_history(user_id).await?;

        let affinity = extract_genre_affinity(&history);
        let played = played_track_ids(&history);
        let tracks =
            recommend_tracks(self.catalog.as_ref(), &played, affinity.favorite.as_deref()).await?;

        tracing::info!(
            user_id = %user_id,
            history_len = history.len(),
            favorite_genre = ?affinity.favorite,
            recommended = tracks.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(tracks)
    }

    /// Weekday profile, top artists and derived insights
    pub async fn insights(&self, user_id: UserId) -> AppResult<ListeningInsights> {
        let start = Instant::now();
        let history = self.load_history(user_id).await?;

        let pattern = WeeklyPattern::aggregate(&history);
        let payload = ListeningInsights {
            insights: generate_insights(&pattern),
            top_artists: rank_artists(&history),
            day_stats: pattern.day_stats(),
        };

        tracing::info!(
            user_id = %user_id,
            history_len = history.len(),
            insights = payload.insights.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Insights computed"
        );

        Ok(payload)
    }

    /// Appends a play signal to the caller's history
    pub async fn record_play(
        &self,
        user_id: UserId,
        request: RecordPlayRequest,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if request.track_id <= 0 {
            return Err(AppError::InvalidInput("trackId must be positive".to_string()));
        }
        self.ensure_account(user_id).await?;

        let played_at = request.played_at.unwrap_or(now);
        self.history
            .append_play(user_id, request.track_id, played_at)
            .await?;

        tracing::info!(user_id = %user_id, track_id = request.track_id, "Play recorded");
        Ok(())
    }

    async fn load_history(&self, user_id: UserId) -> AppResult<Vec<PlayEvent>> {
        self.ensure_account(user_id).await?;
        self.history.read_history(user_id).await
    }

    async fn ensure_account(&self, user_id: UserId) -> AppResult<()> {
        if self.accounts.account_exists(user_id).await? {
            Ok(())
        } else {
            tracing::warn!(user_id = %user_id, "Unknown caller");
            Err(AppError::NotFound("User not found".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{MockAccountDirectory, MockHistoryStore, MockTrackCatalog};
    use crate::db::{MemoryLibrary, NewTrack};
    use uuid::Uuid;

    fn analytics_over(library: &MemoryLibrary) -> ListeningAnalytics {
        let shared = Arc::new(library.clone());
        ListeningAnalytics::new(shared.clone(), shared.clone(), shared)
    }

    #[tokio::test]
    async fn test_unknown_caller_is_not_found() {
        let mut accounts = MockAccountDirectory::new();
        accounts.expect_account_exists().returning(|_| Ok(false));
        let mut history = MockHistoryStore::new();
        history.expect_read_history().times(0);

        let analytics = ListeningAnalytics::new(
            Arc::new(accounts),
            Arc::new(history),
            Arc::new(MockTrackCatalog::new()),
        );

        let result = analytics.insights(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_history_failure_aborts_insights() {
        let mut accounts = MockAccountDirectory::new();
        accounts.expect_account_exists().returning(|_| Ok(true));
        let mut history = MockHistoryStore::new();
        history
            .expect_read_history()
            .returning(|_| Err(AppError::Internal("history unavailable".to_string())));

        let analytics = ListeningAnalytics::new(
            Arc::new(accounts),
            Arc::new(history),
            Arc::new(MockTrackCatalog::new()),
        );

        let result = analytics.insights(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_recommendations_follow_recent_genre() {
        let library = MemoryLibrary::new();
        let user = library.add_user().await;
        let rock = library.add_track(NewTrack::new("Played Rock").genre("Rock")).await;
        let jazz = library.add_track(NewTrack::new("Played Jazz").genre("Jazz")).await;
        for i in 0..20 {
            library
                .add_track(NewTrack::new(format!("Rock {}", i)).genre("Rock"))
                .await;
        }

        let analytics = analytics_over(&library);
        let now = Utc::now();
        for track_id in [rock, rock, jazz, rock] {
            analytics
                .record_play(user, RecordPlayRequest { track_id, played_at: None }, now)
                .await
                .unwrap();
        }

        let tracks = analytics.recommendations(user).await.unwrap();
        assert_eq!(tracks.len(), 10);
        assert!(tracks.iter().all(|t| t.genre.as_deref() == Some("Rock")));
        assert!(tracks.iter().all(|t| t.id != rock && t.id != jazz));
    }

    #[tokio::test]
    async fn test_record_play_rejects_non_positive_track_id() {
        let library = MemoryLibrary::new();
        let user = library.add_user().await;
        let analytics = analytics_over(&library);

        let result = analytics
            .record_play(user, RecordPlayRequest { track_id: 0, played_at: None }, Utc::now())
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_record_play_uses_supplied_timestamp() {
        let library = MemoryLibrary::new();
        let user = library.add_user().await;
        let track = library.add_track(NewTrack::new("Song")).await;
        let analytics = analytics_over(&library);

        let played_at = "2024-02-13T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        analytics
            .record_play(
                user,
                RecordPlayRequest {
                    track_id: track,
                    played_at: Some(played_at),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let insights = analytics.insights(user).await.unwrap();
        // 2024-02-13 was a Tuesday
        assert_eq!(insights.day_stats[2].count, 1);
    }
}
