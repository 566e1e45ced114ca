//! In-memory ranking snapshots.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roteirum_core::domain::{RankingPeriod, RankingSnapshot};
use roteirum_core::error::RepoError;
use roteirum_core::ports::RankingHistory;

/// Keeps the latest snapshot per period.
#[derive(Default)]
pub struct InMemoryRankingHistory {
    snapshots: RwLock<HashMap<RankingPeriod, RankingSnapshot>>,
}

impl InMemoryRankingHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankingHistory for InMemoryRankingHistory {
    async fn latest(&self, period: RankingPeriod) -> Result<Option<RankingSnapshot>, RepoError> {
        Ok(self.snapshots.read().await.get(&period).cloned())
    }

    async fn record(&self, snapshot: RankingSnapshot) -> Result<(), RepoError> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.period, snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_record_replaces_per_period() {
        let history = InMemoryRankingHistory::new();
        assert!(history.latest(RankingPeriod::Week).await.unwrap().is_none());

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        for ids in [vec![first], vec![second, first]] {
            history
                .record(RankingSnapshot {
                    period: RankingPeriod::Week,
                    post_ids: ids,
                    taken_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let latest = history.latest(RankingPeriod::Week).await.unwrap().unwrap();
        assert_eq!(latest.post_ids, vec![second, first]);
        assert!(history.latest(RankingPeriod::Month).await.unwrap().is_none());
    }
}
