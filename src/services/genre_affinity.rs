use std::collections::BTreeMap;

use crate::models::PlayEvent;

/// Number of most recent genre-tagged plays that shape the affinity
pub const GENRE_WINDOW: usize = 50;

/// Genre distribution over the recent genre-tagged window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreAffinity {
    pub counts: BTreeMap<String, usize>,
    pub favorite: Option<String>,
}

/// Derives the dominant genre from recent history
///
/// Untagged plays are dropped before windowing, so they never push tagged
/// plays out of the window. The favourite is tracked as a running maximum in
/// scan order: a genre only takes over when its count strictly exceeds the
/// current maximum, so the first genre to reach a count keeps it on ties.
pub fn extract_genre_affinity(history: &[PlayEvent]) -> GenreAffinity {
    let tagged: Vec<&str> = history
        .iter()
        .filter_map(|event| event.genre.as_deref())
        .collect();
    let window = &tagged[tagged.len().saturating_sub(GENRE_WINDOW)..];

    let mut affinity = GenreAffinity::default();
    let mut max_count = 0;

    for genre in window {
        let count = affinity.counts.entry(genre.to_string()).or_insert(0);
        *count += 1;

        if *count > max_count {
            max_count = *count;
            affinity.favorite = Some(genre.to_string());
        }
    }

    affinity
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn play(genre: Option<&str>) -> PlayEvent {
        PlayEvent {
            track_id: 1,
            genre: genre.map(str::to_string),
            artist: None,
            played_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn plays(genres: &[&str]) -> Vec<PlayEvent> {
        genres.iter().map(|g| play(Some(g))).collect()
    }

    #[test]
    fn test_empty_history() {
        let affinity = extract_genre_affinity(&[]);
        assert!(affinity.counts.is_empty());
        assert_eq!(affinity.favorite, None);
    }

    #[test]
    fn test_untagged_history_has_no_favorite() {
        let affinity = extract_genre_affinity(&[play(None), play(None)]);
        assert!(affinity.counts.is_empty());
        assert_eq!(affinity.favorite, None);
    }

    #[test]
    fn test_majority_genre_wins() {
        let affinity = extract_genre_affinity(&plays(&["Rock", "Jazz", "Rock", "Rock"]));
        assert_eq!(affinity.favorite.as_deref(), Some("Rock"));
        assert_eq!(affinity.counts["Rock"], 3);
        assert_eq!(affinity.counts["Jazz"], 1);
    }

    #[test]
    fn test_tie_keeps_first_to_reach_maximum() {
        let affinity = extract_genre_affinity(&plays(&["Jazz", "Rock", "Rock", "Jazz"]));
        // Rock reaches 2 before Jazz does; Jazz only equals it
        assert_eq!(affinity.favorite.as_deref(), Some("Rock"));

        let affinity = extract_genre_affinity(&plays(&["Jazz", "Rock"]));
        assert_eq!(affinity.favorite.as_deref(), Some("Jazz"));
    }

    #[test]
    fn test_window_only_covers_recent_tagged_plays() {
        // 60 old Jazz plays followed by 50 Rock plays: Jazz falls out entirely
        let mut history = plays(&["Jazz"; 60]);
        history.extend(plays(&["Rock"; GENRE_WINDOW]));

        let affinity = extract_genre_affinity(&history);
        assert_eq!(affinity.favorite.as_deref(), Some("Rock"));
        assert!(!affinity.counts.contains_key("Jazz"));
        assert_eq!(affinity.counts.values().sum::<usize>(), GENRE_WINDOW);
    }

    #[test]
    fn test_untagged_plays_do_not_consume_window() {
        // 49 Jazz, then 100 untagged, then 1 Rock: all 50 tagged plays still count
        let mut history = plays(&["Jazz"; 49]);
        history.extend((0..100).map(|_| play(None)));
        history.push(play(Some("Rock")));

        let affinity = extract_genre_affinity(&history);
        assert_eq!(affinity.counts["Jazz"], 49);
        assert_eq!(affinity.counts["Rock"], 1);
        assert_eq!(affinity.favorite.as_deref(), Some("Jazz"));
    }
}
