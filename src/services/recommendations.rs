use std::collections::HashSet;

use crate::{
    db::TrackCatalog,
    error::AppResult,
    models::{PlayEvent, Track, TrackId},
};

/// Maximum number of recommended tracks
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Every track id that appears anywhere in the history, in first-play order
pub fn played_track_ids(history: &[PlayEvent]) -> Vec<TrackId> {
    let mut seen = HashSet::new();
    history
        .iter()
        .map(|event| event.track_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Builds the recommendation list for a listener
///
/// Unplayed tracks of the favourite genre come first (ascending id), then the
/// shortfall is filled with the most played unplayed tracks overall. Without a
/// favourite genre the whole list comes from the popularity block.
pub async fn recommend_tracks(
    catalog: &dyn TrackCatalog,
    played: &[TrackId],
    favorite_genre: Option<&str>,
) -> AppResult<Vec<Track>> {
    let mut recommended = match favorite_genre {
        Some(genre) => {
            catalog
                .tracks_by_genre_excluding(genre, played, RECOMMENDATION_LIMIT)
                .await?
        }
        None => Vec::new(),
    };
    recommended.truncate(RECOMMENDATION_LIMIT);
    let genre_matches = recommended.len();

    if genre_matches < RECOMMENDATION_LIMIT {
        let mut exclude: Vec<TrackId> = played.to_vec();
        exclude.extend(recommended.iter().map(|t| t.id));

        let popular = catalog
            .tracks_by_popularity_excluding(&exclude, RECOMMENDATION_LIMIT - genre_matches)
            .await?;

        recommended.extend(popular);
        recommended.truncate(RECOMMENDATION_LIMIT);
    }

    tracing::debug!(
        genre = favorite_genre.unwrap_or("-"),
        genre_matches,
        total = recommended.len(),
        "Recommendations ranked"
    );

    Ok(recommended)
}
