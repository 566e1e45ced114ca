//! Cron-style job scheduler using tokio-cron-scheduler.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use roteirum_core::services::RankingService;

/// Midnight every day (seconds field first).
const DEFAULT_SNAPSHOT_CRON: &str = "0 0 0 * * *";

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Enable scheduler.
    pub enabled: bool,
    /// When to record ranking baselines.
    pub snapshot_cron: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_cron: DEFAULT_SNAPSHOT_CRON.to_string(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("SCHEDULER_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            snapshot_cron: std::env::var("RANKING_SNAPSHOT_CRON")
                .unwrap_or_else(|_| DEFAULT_SNAPSHOT_CRON.to_string()),
        }
    }
}

/// Cron job scheduler wrapper.
pub struct Scheduler {
    inner: JobScheduler,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a new scheduler.
    pub async fn new(config: SchedulerConfig) -> Result<Self, JobSchedulerError> {
        let inner = JobScheduler::new().await?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Add a cron job.
    pub async fn add_cron<F, Fut>(
        &self,
        schedule: &str,
        task: F,
    ) -> Result<uuid::Uuid, JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let task = task.clone();
            Box::pin(async move {
                task().await;
            })
        })?;

        let id = self.inner.add(job).await?;
        tracing::info!(schedule = %schedule, job_id = %id, "Cron job registered");
        Ok(id)
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        if !self.config.enabled {
            tracing::info!("Scheduler disabled");
            return Ok(());
        }

        self.inner.start().await?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    /// Stop the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}

/// Register the job that records every ranking baseline on the configured cron.
pub async fn schedule_ranking_snapshots(
    scheduler: &Scheduler,
    ranking: RankingService,
) -> Result<uuid::Uuid, JobSchedulerError> {
    let schedule = scheduler.config().snapshot_cron.clone();
    scheduler
        .add_cron(&schedule, move || {
            let ranking = ranking.clone();
            async move {
                match ranking.snapshot_all().await {
                    Ok(taken) => tracing::info!(periods = taken.len(), "Ranking baselines rotated"),
                    Err(e) => tracing::error!(error = %e, "Ranking snapshot job failed"),
                }
            }
        })
        .await
}
