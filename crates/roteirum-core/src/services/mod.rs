//! Application services - use cases composed from the pure logic and the ports.

mod auth;
mod posts;
mod ranking;

pub use auth::{AuthService, Session};
pub use posts::{PostService, PostStats};
pub use ranking::{
    DEFAULT_TRENDING_LIMIT, DEFAULT_TRENDING_WINDOW_DAYS, Leaderboard, RankingService,
};
