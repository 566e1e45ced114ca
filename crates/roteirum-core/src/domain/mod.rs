//! Domain entities - the core business objects.

mod post;
mod ranking;
mod user;

pub use post::{Comment, Post, PostMutation, PostType};
pub use ranking::{
    AuthorStanding, RankingEntry, RankingPeriod, RankingPosition, RankingSnapshot, RankingStats,
    TrendingEntry,
};
pub use user::User;
