pub mod analytics;
pub mod artist_frequency;
pub mod genre_affinity;
pub mod insights;
pub mod recommendations;
pub mod weekly_pattern;

pub use analytics::ListeningAnalytics;
