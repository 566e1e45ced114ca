//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ----- auth -----

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response containing a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// ----- posts -----

/// Author block embedded in posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    /// `None` when the author account no longer exists.
    pub author: Option<AuthorSummary>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author: Option<AuthorSummary>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub likes: u32,
    pub saves: u32,
    pub liked_by: Vec<Uuid>,
    pub saved_by: Vec<Uuid>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feed query string: `?type&author&tag&q&cursor&limit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub author: Option<Uuid>,
    pub tag: Option<String>,
    pub q: Option<String>,
    /// Offset into the filtered feed.
    pub cursor: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
    pub next_cursor: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAddedResponse {
    pub comment: CommentResponse,
    pub comment_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostStatsResponse {
    pub likes: u32,
    pub saves: u32,
    pub comments: usize,
    pub liked_by: Vec<Uuid>,
    pub saved_by: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub share_url: String,
}

// ----- ranking -----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingQuery {
    pub period: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntryResponse {
    pub position: usize,
    pub post: PostResponse,
    pub score: f64,
    /// +1 moved up, -1 moved down, 0 unchanged since the last snapshot.
    pub change: i8,
    pub is_new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub period: String,
    pub entries: Vec<RankingEntryResponse>,
    pub total_posts: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorStandingResponse {
    pub id: Uuid,
    pub name: String,
    pub count: usize,
    pub total_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingStatsResponse {
    pub period: String,
    pub total_posts: usize,
    pub total_likes: u64,
    pub total_saves: u64,
    pub total_comments: u64,
    pub average_score: f64,
    pub type_distribution: BTreeMap<String, usize>,
    pub top_authors: Vec<AuthorStandingResponse>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEntryResponse {
    pub position: usize,
    pub post: PostResponse,
    pub trend_score: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingPositionResponse {
    pub post_id: Uuid,
    pub period: String,
    pub position: Option<usize>,
    pub total_posts: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub period: String,
    pub post_count: usize,
    pub taken_at: DateTime<Utc>,
}
