//! Popularity scoring and leaderboard construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AuthorStanding, Post, PostType, RankingEntry, RankingPeriod, RankingSnapshot, RankingStats,
    TrendingEntry, User,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Default leaderboard length.
pub const DEFAULT_LIMIT: usize = 100;
/// Leaderboard length used when locating a single post or aggregating stats.
pub const FULL_LIMIT: usize = 1000;
/// Number of authors reported in ranking stats.
pub const TOP_AUTHORS: usize = 10;

/// Interaction weights for the base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub like: f64,
    pub save: f64,
    pub comment: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            save: 2.0,
            comment: 3.0,
        }
    }
}

/// Whole days elapsed since `created_at`, floored.
pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_seconds().div_euclid(SECONDS_PER_DAY)
}

fn recency_multiplier(age_days: i64) -> f64 {
    if age_days <= 1 {
        1.2
    } else if age_days <= 7 {
        1.1
    } else {
        1.0
    }
}

fn type_multiplier(post_type: PostType) -> f64 {
    match post_type {
        PostType::AiImage => 1.15,
        PostType::Poster => 1.10,
        PostType::Synopsis => 1.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Popularity score of a post within a period, rounded to two decimals.
///
/// Posts older than a bounded period score 0.
pub fn score(post: &Post, period: RankingPeriod, now: DateTime<Utc>) -> f64 {
    score_with(post, period, now, ScoreWeights::default())
}

pub fn score_with(
    post: &Post,
    period: RankingPeriod,
    now: DateTime<Utc>,
    weights: ScoreWeights,
) -> f64 {
    let age = age_in_days(post.created_at, now);
    if period.max_days().is_some_and(|max| age > max) {
        return 0.0;
    }

    let base = f64::from(post.likes) * weights.like
        + f64::from(post.saves) * weights.save
        + post.comment_count() as f64 * weights.comment;

    round2(base * recency_multiplier(age) * type_multiplier(post.post_type))
}

/// Build a leaderboard.
///
/// Zero scores are dropped, the rest sorted by descending score (ties keep
/// input order), truncated to `limit` and numbered from 1. `change` and
/// `is_new` are derived from `previous` when a baseline exists.
pub fn rank(
    posts: &[Post],
    period: RankingPeriod,
    limit: usize,
    now: DateTime<Utc>,
    previous: Option<&RankingSnapshot>,
) -> Vec<RankingEntry> {
    let mut scored: Vec<(f64, &Post)> = posts
        .iter()
        .map(|p| (score(p, period, now), p))
        .filter(|(s, _)| *s > 0.0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, post))| {
            let position = i + 1;
            let (change, is_new) = match previous {
                Some(snapshot) => match snapshot.position_of(post.id) {
                    Some(before) => (position_change(before, position), false),
                    None => (0, true),
                },
                None => (0, false),
            };
            RankingEntry {
                position,
                post: post.clone(),
                score,
                change,
                is_new,
            }
        })
        .collect()
}

fn position_change(before: usize, now: usize) -> i8 {
    match before.cmp(&now) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Capture a leaderboard as the baseline for later comparisons.
pub fn snapshot(
    entries: &[RankingEntry],
    period: RankingPeriod,
    now: DateTime<Utc>,
) -> RankingSnapshot {
    RankingSnapshot {
        period,
        post_ids: entries.iter().map(|e| e.post.id).collect(),
        taken_at: now,
    }
}

/// Aggregate a leaderboard into period statistics.
pub fn summarize(
    entries: &[RankingEntry],
    period: RankingPeriod,
    authors: &HashMap<Uuid, User>,
    now: DateTime<Utc>,
) -> RankingStats {
    let total_likes = entries.iter().map(|e| u64::from(e.post.likes)).sum();
    let total_saves = entries.iter().map(|e| u64::from(e.post.saves)).sum();
    let total_comments = entries.iter().map(|e| e.post.comment_count() as u64).sum();

    let average_score = if entries.is_empty() {
        0.0
    } else {
        round2(entries.iter().map(|e| e.score).sum::<f64>() / entries.len() as f64)
    };

    let mut type_distribution: HashMap<PostType, usize> =
        PostType::ALL.into_iter().map(|t| (t, 0)).collect();
    for entry in entries {
        *type_distribution.entry(entry.post.post_type).or_default() += 1;
    }

    // First-seen order keeps ties deterministic.
    let mut standings: Vec<AuthorStanding> = Vec::new();
    for entry in entries {
        let author_id = entry.post.author_id;
        match standings.iter_mut().find(|s| s.id == author_id) {
            Some(standing) => {
                standing.count += 1;
                standing.total_score += entry.score;
            }
            None => standings.push(AuthorStanding {
                id: author_id,
                name: authors
                    .get(&author_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
                count: 1,
                total_score: entry.score,
            }),
        }
    }
    standings.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    standings.truncate(TOP_AUTHORS);

    RankingStats {
        period,
        total_posts: entries.len(),
        total_likes,
        total_saves,
        total_comments,
        average_score,
        type_distribution,
        top_authors: standings,
        last_updated: now,
    }
}

/// Unweighted engagement used for trending.
pub fn trend_score(post: &Post) -> u64 {
    u64::from(post.likes) + u64::from(post.saves) * 2 + post.comment_count() as u64 * 3
}

/// Recent posts ordered by engagement.
pub fn trending(
    posts: &[Post],
    window_days: i64,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<TrendingEntry> {
    let mut recent: Vec<(u64, &Post)> = posts
        .iter()
        .filter(|p| age_in_days(p.created_at, now) <= window_days)
        .map(|p| (trend_score(p), p))
        .collect();
    recent.sort_by(|a, b| b.0.cmp(&a.0));
    recent.truncate(limit);

    recent
        .into_iter()
        .enumerate()
        .map(|(i, (trend_score, post))| TrendingEntry {
            position: i + 1,
            post: post.clone(),
            trend_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, PostMutation};
    use chrono::Duration;

    fn post_with(
        post_type: PostType,
        likes: usize,
        saves: usize,
        comments: usize,
        created_at: DateTime<Utc>,
    ) -> Post {
        let mut post = Post::new(Uuid::new_v4(), post_type, "t", "c").created(created_at);
        for _ in 0..likes {
            post.apply(PostMutation::Like(Uuid::new_v4())).unwrap();
        }
        for _ in 0..saves {
            post.apply(PostMutation::Save(Uuid::new_v4())).unwrap();
        }
        for _ in 0..comments {
            let comment = Comment::new(post.id, Uuid::new_v4(), "boa").unwrap();
            post.apply(PostMutation::Comment(comment)).unwrap();
        }
        post
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_score() {
        let now = Utc::now();
        let post = post_with(PostType::AiImage, 10, 5, 2, now);
        assert!(approx(score(&post, RankingPeriod::Month, now), 35.88));
    }

    #[test]
    fn test_recency_and_type_multipliers() {
        let now = Utc::now();
        let week_old = post_with(PostType::Poster, 10, 0, 0, now - Duration::days(5));
        let old = post_with(PostType::Synopsis, 10, 0, 0, now - Duration::days(20));

        assert!(approx(score(&week_old, RankingPeriod::All, now), 12.1));
        assert!(approx(score(&old, RankingPeriod::All, now), 10.0));
    }

    #[test]
    fn test_age_is_floored() {
        let now = Utc::now();
        assert_eq!(age_in_days(now - Duration::hours(47), now), 1);
        assert_eq!(age_in_days(now - Duration::hours(48), now), 2);
    }

    #[test]
    fn test_posts_outside_period_score_zero_and_never_rank() {
        let now = Utc::now();
        let stale = post_with(PostType::AiImage, 50, 50, 5, now - Duration::days(8));
        let fresh = post_with(PostType::Synopsis, 1, 0, 0, now);

        assert_eq!(score(&stale, RankingPeriod::Week, now), 0.0);
        assert!(score(&stale, RankingPeriod::Month, now) > 0.0);

        let posts = vec![stale.clone(), fresh.clone()];
        let ranking = rank(&posts, RankingPeriod::Week, DEFAULT_LIMIT, now, None);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].post.id, fresh.id);
    }

    #[test]
    fn test_rank_sorts_descending_with_stable_ties() {
        let now = Utc::now();
        let old = now - Duration::days(10);
        let a = post_with(PostType::Synopsis, 3, 0, 0, old);
        let b = post_with(PostType::Synopsis, 9, 0, 0, old);
        let c = post_with(PostType::Synopsis, 3, 0, 0, old);
        let zero = post_with(PostType::Synopsis, 0, 0, 0, old);

        let posts = vec![a.clone(), b.clone(), zero, c.clone()];
        let ranking = rank(&posts, RankingPeriod::All, DEFAULT_LIMIT, now, None);

        let ids: Vec<Uuid> = ranking.iter().map(|e| e.post.id).collect();
        assert_eq!(ids, vec![b.id, a.id, c.id]);
        assert_eq!(
            ranking.iter().map(|e| e.position).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(ranking.iter().all(|e| e.change == 0 && !e.is_new));
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let now = Utc::now();
        let posts: Vec<Post> = (1..=5)
            .map(|n| post_with(PostType::Poster, n, 0, 0, now))
            .collect();
        assert_eq!(rank(&posts, RankingPeriod::All, 2, now, None).len(), 2);
    }

    #[test]
    fn test_change_and_new_come_from_snapshot() {
        let now = Utc::now();
        let old = now - Duration::days(10);
        let a = post_with(PostType::Synopsis, 5, 0, 0, old);
        let b = post_with(PostType::Synopsis, 4, 0, 0, old);
        let c = post_with(PostType::Synopsis, 3, 0, 0, old);

        let previous = RankingSnapshot {
            period: RankingPeriod::All,
            post_ids: vec![b.id, a.id],
            taken_at: old,
        };
        let ranking = rank(
            &[a.clone(), b.clone(), c.clone()],
            RankingPeriod::All,
            DEFAULT_LIMIT,
            now,
            Some(&previous),
        );

        assert_eq!((ranking[0].change, ranking[0].is_new), (1, false));
        assert_eq!((ranking[1].change, ranking[1].is_new), (-1, false));
        assert_eq!((ranking[2].change, ranking[2].is_new), (0, true));

        let next = snapshot(&ranking, RankingPeriod::All, now);
        assert_eq!(next.post_ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn test_summarize_totals_and_authors() {
        let now = Utc::now();
        let author = User::new("Lucas Rubo".into(), "lucas@roteirum.com".into(), String::new());
        let mut first = post_with(PostType::AiImage, 2, 1, 2, now - Duration::days(10));
        let mut second = post_with(PostType::Synopsis, 4, 0, 0, now - Duration::days(10));
        first.author_id = author.id;
        second.author_id = author.id;
        let authors: HashMap<Uuid, User> = [(author.id, author)].into_iter().collect();

        let ranking = rank(&[first, second], RankingPeriod::All, FULL_LIMIT, now, None);
        let stats = summarize(&ranking, RankingPeriod::All, &authors, now);

        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_likes, 6);
        assert_eq!(stats.total_saves, 1);
        assert_eq!(stats.total_comments, 2);
        // 10 * 1.15 and 4.0
        assert!(approx(stats.average_score, 7.75));
        assert_eq!(stats.type_distribution[&PostType::AiImage], 1);
        assert_eq!(stats.type_distribution[&PostType::Poster], 0);
        assert_eq!(stats.top_authors.len(), 1);
        assert_eq!(stats.top_authors[0].name, "Lucas Rubo");
        assert_eq!(stats.top_authors[0].count, 2);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[], RankingPeriod::Week, &HashMap::new(), Utc::now());
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.average_score, 0.0);
    }

    #[test]
    fn test_trending_only_recent_posts() {
        let now = Utc::now();
        let recent = post_with(PostType::Synopsis, 1, 1, 1, now - Duration::days(2));
        let hot = post_with(PostType::Synopsis, 10, 0, 0, now);
        let stale = post_with(PostType::Synopsis, 100, 0, 0, now - Duration::days(4));

        let out = trending(&[recent.clone(), hot.clone(), stale], 3, 10, now);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].post.id, hot.id);
        assert_eq!(out[0].trend_score, 10);
        assert_eq!(out[1].trend_score, 6);
        assert_eq!(out[1].position, 2);
    }
}
