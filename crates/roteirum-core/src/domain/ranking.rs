use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::{Post, PostType};

/// Ranking time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPeriod {
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl RankingPeriod {
    pub const ALL: [RankingPeriod; 4] = [
        RankingPeriod::Week,
        RankingPeriod::Month,
        RankingPeriod::Year,
        RankingPeriod::All,
    ];

    /// Maximum post age in days, `None` when unbounded.
    pub fn max_days(&self) -> Option<i64> {
        match self {
            RankingPeriod::Week => Some(7),
            RankingPeriod::Month => Some(30),
            RankingPeriod::Year => Some(365),
            RankingPeriod::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingPeriod::Week => "week",
            RankingPeriod::Month => "month",
            RankingPeriod::Year => "year",
            RankingPeriod::All => "all",
        }
    }

    /// Parse a period id, falling back to the default for unknown ids.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for RankingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingPeriod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(RankingPeriod::Week),
            "month" => Ok(RankingPeriod::Month),
            "year" => Ok(RankingPeriod::Year),
            "all" => Ok(RankingPeriod::All),
            _ => Err(()),
        }
    }
}

/// A post's place on a period leaderboard. Never persisted.
#[derive(Debug, Clone)]
pub struct RankingEntry {
    pub position: usize,
    pub post: Post,
    pub score: f64,
    /// +1 moved up, -1 moved down, 0 unchanged or no baseline.
    pub change: i8,
    pub is_new: bool,
}

/// Ordered post ids of a ranking, kept as the baseline for the next one.
#[derive(Debug, Clone)]
pub struct RankingSnapshot {
    pub period: RankingPeriod,
    pub post_ids: Vec<Uuid>,
    pub taken_at: DateTime<Utc>,
}

impl RankingSnapshot {
    /// 1-based position of a post in the snapshot.
    pub fn position_of(&self, post_id: Uuid) -> Option<usize> {
        self.post_ids.iter().position(|id| *id == post_id).map(|i| i + 1)
    }
}

#[derive(Debug, Clone)]
pub struct AuthorStanding {
    pub id: Uuid,
    pub name: String,
    pub count: usize,
    pub total_score: f64,
}

/// Aggregates over a period's ranking.
#[derive(Debug, Clone)]
pub struct RankingStats {
    pub period: RankingPeriod,
    pub total_posts: usize,
    pub total_likes: u64,
    pub total_saves: u64,
    pub total_comments: u64,
    pub average_score: f64,
    pub type_distribution: HashMap<PostType, usize>,
    pub top_authors: Vec<AuthorStanding>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TrendingEntry {
    pub position: usize,
    pub post: Post,
    pub trend_score: u64,
}

#[derive(Debug, Clone)]
pub struct RankingPosition {
    pub position: Option<usize>,
    pub total_posts: usize,
}
