//! Leaderboards, ranking statistics and trending posts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    RankingEntry, RankingPeriod, RankingPosition, RankingSnapshot, RankingStats, TrendingEntry,
    User,
};
use crate::error::DomainError;
use crate::ports::{PostRepository, RankingHistory, UserRepository};
use crate::ranking;

/// Default age window for trending posts, in days.
pub const DEFAULT_TRENDING_WINDOW_DAYS: i64 = 3;

/// Default number of trending posts returned.
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// A computed leaderboard.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub period: RankingPeriod,
    pub entries: Vec<RankingEntry>,
    pub total_posts: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone)]
pub struct RankingService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    history: Arc<dyn RankingHistory>,
    trending_window_days: i64,
}

impl RankingService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        history: Arc<dyn RankingHistory>,
    ) -> Self {
        Self {
            posts,
            users,
            history,
            trending_window_days: DEFAULT_TRENDING_WINDOW_DAYS,
        }
    }

    pub fn with_trending_window(mut self, days: i64) -> Self {
        self.trending_window_days = days;
        self
    }

    /// Leaderboard for a period, compared against the last snapshot.
    pub async fn leaderboard(
        &self,
        period: RankingPeriod,
        limit: usize,
    ) -> Result<Leaderboard, DomainError> {
        let now = Utc::now();
        let posts = self.posts.list().await?;
        let previous = self.history.latest(period).await?;

        let entries = ranking::rank(&posts, period, limit, now, previous.as_ref());
        tracing::debug!(
            period = %period,
            ranked = entries.len(),
            has_baseline = previous.is_some(),
            "Leaderboard computed"
        );

        Ok(Leaderboard {
            period,
            total_posts: entries.len(),
            entries,
            last_updated: now,
        })
    }

    /// Where a post stands in the full leaderboard.
    pub async fn position(
        &self,
        post_id: Uuid,
        period: RankingPeriod,
    ) -> Result<RankingPosition, DomainError> {
        let board = self.leaderboard(period, ranking::FULL_LIMIT).await?;
        let position = board
            .entries
            .iter()
            .find(|e| e.post.id == post_id)
            .map(|e| e.position);

        Ok(RankingPosition {
            position,
            total_posts: board.total_posts,
        })
    }

    pub async fn stats(&self, period: RankingPeriod) -> Result<RankingStats, DomainError> {
        let board = self.leaderboard(period, ranking::FULL_LIMIT).await?;
        let authors = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|u: User| (u.id, u))
            .collect();

        Ok(ranking::summarize(
            &board.entries,
            period,
            &authors,
            board.last_updated,
        ))
    }

    pub async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>, DomainError> {
        let posts = self.posts.list().await?;
        Ok(ranking::trending(
            &posts,
            self.trending_window_days,
            limit,
            Utc::now(),
        ))
    }

    /// Record the current leaderboard as the baseline for position changes.
    pub async fn take_snapshot(
        &self,
        period: RankingPeriod,
    ) -> Result<RankingSnapshot, DomainError> {
        let board = self.leaderboard(period, ranking::FULL_LIMIT).await?;
        let snapshot = ranking::snapshot(&board.entries, period, board.last_updated);
        self.history.record(snapshot.clone()).await?;

        tracing::info!(period = %period, posts = snapshot.post_ids.len(), "Ranking snapshot recorded");
        Ok(snapshot)
    }

    /// Snapshot every period.
    pub async fn snapshot_all(&self) -> Result<Vec<RankingSnapshot>, DomainError> {
        let mut taken = Vec::with_capacity(RankingPeriod::ALL.len());
        for period in RankingPeriod::ALL {
            taken.push(self.take_snapshot(period).await?);
        }
        Ok(taken)
    }
}
