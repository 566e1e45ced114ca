//! Background work run alongside the HTTP server.

mod scheduler;

pub use scheduler::{Scheduler, SchedulerConfig, schedule_ranking_snapshots};
