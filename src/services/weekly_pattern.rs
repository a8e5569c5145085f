use chrono::Datelike;

use crate::models::{DayCount, PlayEvent};

/// Weekday labels in bucket order, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Full weekday names, indexed like `WEEKDAY_LABELS`
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Lifetime play counts per weekday
///
/// Covers the whole history rather than the last seven days. Weekdays are
/// taken from the UTC timestamp of each play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyPattern {
    buckets: [u64; 7],
}

impl WeeklyPattern {
    /// Buckets every play in the history by its weekday
    pub fn aggregate(history: &[PlayEvent]) -> Self {
        let mut pattern = Self::default();
        for event in history {
            let day = event.played_at.weekday().num_days_from_sunday() as usize;
            pattern.buckets[day] += 1;
        }
        pattern
    }

    /// Count for a bucket index, 0 = Sunday
    #[cfg(test)]
    fn count(&self, day: usize) -> u64 {
        self.buckets[day]
    }

    /// Number of plays across all buckets
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// Busiest weekday index and its count
    ///
    /// Buckets are scanned Sunday to Saturday and only a strictly greater
    /// count replaces the current pick. Returns `None` when nothing was played.
    pub fn busiest_day(&self) -> Option<(usize, u64)> {
        let mut best: Option<(usize, u64)> = None;
        for (day, &count) in self.buckets.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((day, count));
            }
        }
        best
    }

    /// Wire representation, always seven entries Sunday first
    pub fn day_stats(&self) -> Vec<DayCount> {
        WEEKDAY_LABELS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&day, &count)| DayCount { day, count })
            .collect()
    }
}
