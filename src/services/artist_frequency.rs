use std::collections::HashMap;

use crate::models::{ArtistCount, PlayEvent};

/// Number of artists reported in the insights payload
pub const TOP_ARTISTS: usize = 5;

/// Ranks artists by lifetime play count
///
/// Counts are keyed by display name, so distinct artists sharing a name are
/// reported as one entry. Plays whose artist no longer resolves are skipped.
/// Equal counts keep the order in which each name first appeared.
pub fn rank_artists(history: &[PlayEvent]) -> Vec<ArtistCount> {
    let mut ranked: Vec<ArtistCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for artist in history.iter().filter_map(|event| event.artist.as_ref()) {
        match positions.get(artist.name.as_str()) {
            Some(&idx) => ranked[idx].count += 1,
            None => {
                positions.insert(artist.name.as_str(), ranked.len());
                ranked.push(ArtistCount {
                    name: artist.name.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, which preserves first-seen order between equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_ARTISTS);
    ranked
}
