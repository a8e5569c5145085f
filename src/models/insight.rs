use serde::Serialize;

/// Kind of derived listening fact
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Most active weekday
    Activity,
    /// Lifetime play total
    TotalPlays,
}

/// One human-readable derived fact about listening behavior
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub icon: String,
    pub text: String,
    pub value: u64,
}

/// Artist display name with its lifetime play count
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArtistCount {
    pub name: String,
    pub count: u64,
}

/// Plays bucketed under one weekday label
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCount {
    pub day: &'static str,
    pub count: u64,
}

/// Payload of the listening insights endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListeningInsights {
    pub insights: Vec<Insight>,
    pub top_artists: Vec<ArtistCount>,
    pub day_stats: Vec<DayCount>,
}
