use crate::models::{Insight, InsightKind};

use super::weekly_pattern::{WeeklyPattern, WEEKDAY_NAMES};

/// Histories longer than this also get a play-total insight
pub const TOTAL_PLAYS_THRESHOLD: u64 = 5;

/// Builds the ordered insight list
///
/// An empty history yields an empty list; clients rely on that to show their
/// "not enough data" state.
///
/// The weekday buckets partition the history, so their total is the play count.
pub fn generate_insights(pattern: &WeeklyPattern) -> Vec<Insight> {
    let mut insights = Vec::new();
    let total_plays = pattern.total();

    if total_plays == 0 {
        return insights;
    }

    if let Some((day, count)) = pattern.busiest_day() {
        insights.push(Insight {
            kind: InsightKind::Activity,
            icon: "📅".to_string(),
            text: format!("You listen the most on {}s", WEEKDAY_NAMES[day]),
            value: count,
        });
    }

    if total_plays > TOTAL_PLAYS_THRESHOLD {
        insights.push(Insight {
            kind: InsightKind::TotalPlays,
            icon: "🎧".to_string(),
            text: format!("You've played {} tracks so far", total_plays),
            value: total_plays,
        });
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayEvent;
    use chrono::{Duration, TimeZone, Utc};

    fn history_on(days_after_sunday: &[i64]) -> Vec<PlayEvent> {
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 18, 30, 0).unwrap();
        days_after_sunday
            .iter()
            .map(|&d| PlayEvent {
                track_id: 1,
                genre: None,
                artist: None,
                played_at: sunday + Duration::days(d),
            })
            .collect()
    }

    fn insights_for(history: &[PlayEvent]) -> Vec<Insight> {
        generate_insights(&WeeklyPattern::aggregate(history))
    }

    #[test]
    fn test_empty_history_yields_empty_list() {
        assert_eq!(insights_for(&[]), Vec::<Insight>::new());
    }

    #[test]
    fn test_short_history_only_reports_activity() {
        let insights = insights_for(&history_on(&[3, 3, 4]));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Activity);
        assert!(insights[0].text.contains("Wednesday"));
        assert_eq!(insights[0].value, 2);
    }

    #[test]
    fn test_five_plays_is_not_enough_for_total() {
        let insights = insights_for(&history_on(&[1, 1, 1, 1, 1]));
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn test_all_tuesday_history() {
        let insights = insights_for(&history_on(&[2, 2, 2, 2, 2, 2]));

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].kind, InsightKind::Activity);
        assert!(insights[0].text.contains("Tuesday"));
        assert_eq!(insights[0].value, 6);
        assert_eq!(insights[1].kind, InsightKind::TotalPlays);
        assert_eq!(insights[1].value, 6);
    }

    #[test]
    fn test_total_plays_counts_whole_history() {
        let history = history_on(&[0, 1, 2, 3, 4, 5, 6, 7, 14]);
        let insights = insights_for(&history);
        assert_eq!(insights[1].kind, InsightKind::TotalPlays);
        assert_eq!(insights[1].value, history.len() as u64);
    }

    #[test]
    fn test_activity_tie_names_earlier_weekday() {
        let insights = insights_for(&history_on(&[6, 0, 6, 0]));
        assert!(insights[0].text.contains("Sunday"));
    }
}
