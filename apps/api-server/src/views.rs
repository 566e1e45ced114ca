//! Domain to wire conversions.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use roteirum_core::domain::{
    Comment, Post, RankingEntry, RankingPeriod, RankingPosition, RankingSnapshot, RankingStats,
    TrendingEntry, User,
};
use roteirum_core::pagination::Page;
use roteirum_core::services::{Leaderboard, PostStats};
use roteirum_shared::dto::{
    AuthorStandingResponse, AuthorSummary, CommentResponse, LeaderboardResponse, PageResponse,
    PostResponse, PostStatsResponse, RankingEntryResponse, RankingPositionResponse,
    RankingStatsResponse, SnapshotResponse, TrendingEntryResponse, UserResponse,
};

pub type Authors = HashMap<Uuid, User>;

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        avatar: user.avatar.clone(),
        bio: user.bio.clone(),
        created_at: user.created_at,
    }
}

fn author(id: Uuid, authors: &Authors) -> Option<AuthorSummary> {
    authors.get(&id).map(|u| AuthorSummary {
        id: u.id,
        name: u.name.clone(),
        avatar: u.avatar.clone(),
    })
}

/// Set members in a stable order so responses are reproducible.
fn sorted(ids: &HashSet<Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.iter().copied().collect();
    ids.sort();
    ids
}

pub fn comment(comment: &Comment, authors: &Authors) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        author: author(comment.author_id, authors),
        content: comment.content.clone(),
        created_at: comment.created_at,
    }
}

pub fn post(post: &Post, authors: &Authors) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        author: author(post.author_id, authors),
        post_type: post.post_type.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        tags: post.tags.clone(),
        likes: post.likes,
        saves: post.saves,
        liked_by: sorted(&post.liked_by),
        saved_by: sorted(&post.saved_by),
        comments: post.comments.iter().map(|c| comment(c, authors)).collect(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn posts(posts: &[Post], authors: &Authors) -> Vec<PostResponse> {
    posts.iter().map(|p| post(p, authors)).collect()
}

pub fn page(page: Page<Post>, authors: &Authors) -> PageResponse<PostResponse> {
    let page = page.map(|p| post(&p, authors));
    PageResponse {
        items: page.items,
        total: page.total,
        page: page.page,
        limit: page.limit,
        has_more: page.has_more,
        next_cursor: page.next_cursor,
    }
}

pub fn stats(stats: &PostStats) -> PostStatsResponse {
    PostStatsResponse {
        likes: stats.likes,
        saves: stats.saves,
        comments: stats.comments,
        liked_by: sorted(&stats.liked_by),
        saved_by: sorted(&stats.saved_by),
    }
}

fn entry(entry: &RankingEntry, authors: &Authors) -> RankingEntryResponse {
    RankingEntryResponse {
        position: entry.position,
        post: post(&entry.post, authors),
        score: entry.score,
        change: entry.change,
        is_new: entry.is_new,
    }
}

pub fn leaderboard(board: &Leaderboard, authors: &Authors) -> LeaderboardResponse {
    LeaderboardResponse {
        period: board.period.to_string(),
        entries: board.entries.iter().map(|e| entry(e, authors)).collect(),
        total_posts: board.total_posts,
        last_updated: board.last_updated,
    }
}

pub fn ranking_stats(stats: &RankingStats) -> RankingStatsResponse {
    RankingStatsResponse {
        period: stats.period.to_string(),
        total_posts: stats.total_posts,
        total_likes: stats.total_likes,
        total_saves: stats.total_saves,
        total_comments: stats.total_comments,
        average_score: stats.average_score,
        type_distribution: stats
            .type_distribution
            .iter()
            .map(|(kind, count)| (kind.to_string(), *count))
            .collect(),
        top_authors: stats
            .top_authors
            .iter()
            .map(|a| AuthorStandingResponse {
                id: a.id,
                name: a.name.clone(),
                count: a.count,
                total_score: a.total_score,
            })
            .collect(),
        last_updated: stats.last_updated,
    }
}

pub fn trending(entries: &[TrendingEntry], authors: &Authors) -> Vec<TrendingEntryResponse> {
    entries
        .iter()
        .map(|t| TrendingEntryResponse {
            position: t.position,
            post: post(&t.post, authors),
            trend_score: t.trend_score,
        })
        .collect()
}

pub fn position(
    post_id: Uuid,
    period: RankingPeriod,
    position: &RankingPosition,
) -> RankingPositionResponse {
    RankingPositionResponse {
        post_id,
        period: period.to_string(),
        position: position.position,
        total_posts: position.total_posts,
    }
}

pub fn snapshot(snapshot: &RankingSnapshot) -> SnapshotResponse {
    SnapshotResponse {
        period: snapshot.period.to_string(),
        post_count: snapshot.post_ids.len(),
        taken_at: snapshot.taken_at,
    }
}
