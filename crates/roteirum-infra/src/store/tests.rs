use std::sync::Arc;

use uuid::Uuid;

use roteirum_core::domain::{Post, PostMutation, PostType, RankingPeriod};
use roteirum_core::error::DomainError;
use roteirum_core::pagination::Paginator;
use roteirum_core::ports::{BaseRepository, PostRepository};
use roteirum_core::query::PostQuery;
use roteirum_core::ranking::DEFAULT_LIMIT;
use roteirum_core::services::{PostService, RankingService};

use super::fixtures::{self, FIXTURE_PASSWORD, post_id, user_id};
use super::test_support::PlainPasswords;
use super::InMemoryStore;

struct Harness {
    store: InMemoryStore,
    posts: PostService,
    ranking: RankingService,
}

fn harness() -> Harness {
    let seed = fixtures::load(&PlainPasswords, FIXTURE_PASSWORD).unwrap();
    let store = InMemoryStore::from_seed(seed);
    let posts = PostService::new(
        store.posts.clone(),
        store.users.clone(),
        "https://roteirum.example/",
    );
    let ranking = RankingService::new(
        store.posts.clone(),
        store.users.clone(),
        store.history.clone(),
    );
    Harness {
        store,
        posts,
        ranking,
    }
}

fn ids(posts: &[Post]) -> Vec<Uuid> {
    posts.iter().map(|p| p.id).collect()
}

async fn board_ids(ranking: &RankingService, period: RankingPeriod) -> Vec<Uuid> {
    ranking
        .leaderboard(period, DEFAULT_LIMIT)
        .await
        .unwrap()
        .entries
        .iter()
        .map(|e| e.post.id)
        .collect()
}

#[tokio::test]
async fn test_like_unlike_round_trip() {
    let h = harness();
    let post = post_id(1);
    let user = user_id(1);
    let before = h.posts.get(post).await.unwrap();

    let liked = h.posts.like(post, user).await.unwrap();
    assert_eq!(liked.likes, before.likes + 1);

    let unliked = h.posts.unlike(post, user).await.unwrap();
    assert_eq!(unliked.likes, before.likes);
    assert_eq!(unliked.liked_by, before.liked_by);
}

#[tokio::test]
async fn test_duplicate_interactions_are_rejected() {
    let h = harness();
    // user 2 already liked and saved post 1 in the seed
    let before = h.posts.get(post_id(1)).await.unwrap();

    let err = h.posts.like(post_id(1), user_id(2)).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyLiked));
    let err = h.posts.save(post_id(1), user_id(2)).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadySaved));
    let err = h.posts.unlike(post_id(1), user_id(1)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotLiked));

    assert_eq!(h.posts.get(post_id(1)).await.unwrap(), before);
}

#[tokio::test]
async fn test_interactions_on_missing_post() {
    let h = harness();
    let err = h.posts.save(Uuid::new_v4(), user_id(1)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn test_add_comment_rules() {
    let h = harness();

    let err = h
        .posts
        .add_comment(post_id(2), Uuid::new_v4(), "Lindo!")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));

    let err = h
        .posts
        .add_comment(post_id(2), user_id(3), "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyComment));

    let (comment, post) = h
        .posts
        .add_comment(post_id(2), user_id(3), " Paleta perfeita. ")
        .await
        .unwrap();
    assert_eq!(comment.content, "Paleta perfeita.");
    assert_eq!(post.comment_count(), 1);

    let comments = h.posts.comments(post_id(3)).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments[0].created_at <= comments[1].created_at);
}

#[tokio::test]
async fn test_stats_and_share() {
    let h = harness();
    let stats = h.posts.stats(post_id(3)).await.unwrap();
    assert_eq!((stats.likes, stats.saves, stats.comments), (4, 3, 2));
    assert!(stats.liked_by.contains(&user_id(5)));

    let url = h.posts.share(post_id(3)).await.unwrap();
    assert_eq!(url, format!("https://roteirum.example/post/{}", post_id(3)));
}

#[tokio::test]
async fn test_feed_is_newest_first_and_pages_cover_everything() {
    let h = harness();
    let all = h.posts.filtered(&PostQuery::new()).await.unwrap();
    assert_eq!(ids(&all), (1..=8).map(post_id).collect::<Vec<_>>());

    let first = h.posts.feed(&PostQuery::new(), 0, 10).await.unwrap();
    assert_eq!(first.items.len(), 8);
    assert!(!first.has_more);

    let mut paginator = Paginator::new(3);
    let mut seen = Vec::new();
    loop {
        seen.extend(paginator.load_page(&all).items);
        if !paginator.has_more() {
            break;
        }
    }
    assert_eq!(ids(&seen), ids(&all));
}

#[tokio::test]
async fn test_feed_filters() {
    let h = harness();

    let ai = h
        .posts
        .filtered(&PostQuery::new().of_type(PostType::AiImage))
        .await
        .unwrap();
    assert_eq!(ids(&ai), vec![post_id(3), post_id(5), post_id(8)]);

    let by_ana = h.posts.filtered(&PostQuery::new().search("ana silva")).await.unwrap();
    assert_eq!(ids(&by_ana), vec![post_id(2), post_id(8)]);

    let nothing = h
        .posts
        .filtered(&PostQuery::new().search("faroeste espacial"))
        .await
        .unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_user_collections() {
    let h = harness();
    h.posts.like(post_id(1), user_id(1)).await.unwrap();

    let liked = h.posts.liked_by_user(user_id(1)).await.unwrap();
    assert_eq!(liked.len(), 7);
    assert_eq!(liked[0].id, post_id(1));

    let saved = h.posts.saved_by_user(user_id(5)).await.unwrap();
    assert!(saved.iter().all(|p| p.is_saved_by(user_id(5))));

    let mine = h.posts.authored_by(user_id(1)).await.unwrap();
    assert_eq!(ids(&mine), vec![post_id(1), post_id(6)]);
}

#[tokio::test]
async fn test_leaderboards_per_period() {
    let h = harness();

    assert_eq!(
        board_ids(&h.ranking, RankingPeriod::Week).await,
        [3, 4, 1, 2].map(post_id).to_vec()
    );
    assert_eq!(
        board_ids(&h.ranking, RankingPeriod::Month).await,
        [3, 4, 1, 5, 6, 2].map(post_id).to_vec()
    );
    assert_eq!(
        board_ids(&h.ranking, RankingPeriod::All).await,
        [3, 8, 4, 1, 5, 6, 2, 7].map(post_id).to_vec()
    );

    let top = h.ranking.leaderboard(RankingPeriod::Week, 1).await.unwrap();
    assert_eq!(top.total_posts, 1);
    assert!((top.entries[0].score - 20.24).abs() < 1e-9);
}

#[tokio::test]
async fn test_position_lookup() {
    let h = harness();

    let month = h.ranking.position(post_id(8), RankingPeriod::Month).await.unwrap();
    assert_eq!(month.position, None);
    assert_eq!(month.total_posts, 6);

    let all = h.ranking.position(post_id(8), RankingPeriod::All).await.unwrap();
    assert_eq!(all.position, Some(2));
}

#[tokio::test]
async fn test_position_changes_follow_snapshot() {
    let h = harness();
    let board = h.ranking.leaderboard(RankingPeriod::Week, DEFAULT_LIMIT).await.unwrap();
    assert!(board.entries.iter().all(|e| e.change == 0 && !e.is_new));

    h.ranking.take_snapshot(RankingPeriod::Week).await.unwrap();

    // Push post 2 from fourth to second place.
    h.posts.like(post_id(2), user_id(2)).await.unwrap();
    h.posts.like(post_id(2), user_id(4)).await.unwrap();
    h.posts.save(post_id(2), user_id(2)).await.unwrap();

    // And add a brand new post.
    let mut fresh = Post::new(user_id(5), PostType::Poster, "Cartaz: Maré Alta", "Drama costeiro");
    fresh.apply(PostMutation::Like(user_id(1))).unwrap();
    h.store.posts.save(fresh.clone()).await.unwrap();

    let board = h.ranking.leaderboard(RankingPeriod::Week, DEFAULT_LIMIT).await.unwrap();
    let summary: Vec<(Uuid, i8, bool)> = board
        .entries
        .iter()
        .map(|e| (e.post.id, e.change, e.is_new))
        .collect();

    assert_eq!(
        summary,
        vec![
            (post_id(3), 0, false),
            (post_id(2), 1, false),
            (post_id(4), -1, false),
            (post_id(1), -1, false),
            (fresh.id, 0, true),
        ]
    );
}

#[tokio::test]
async fn test_ranking_stats_and_trending() {
    let h = harness();

    let stats = h.ranking.stats(RankingPeriod::Week).await.unwrap();
    assert_eq!(stats.total_posts, 4);
    assert_eq!(stats.total_likes, 13);
    assert_eq!(stats.type_distribution[&PostType::Synopsis], 2);
    assert_eq!(stats.top_authors[0].id, user_id(3));
    assert_eq!(stats.top_authors[0].name, "Carlos Mendes");

    let trending = h.ranking.trending(10).await.unwrap();
    let order: Vec<Uuid> = trending.iter().map(|t| t.post.id).collect();
    assert_eq!(order, [3, 1, 2].map(post_id).to_vec());
    assert_eq!(trending[0].trend_score, 16);
}

#[tokio::test]
async fn test_shared_repository_handles() {
    let h = harness();
    let extra = Arc::clone(&h.store.posts);
    extra.apply(post_id(7), PostMutation::Save(user_id(3))).await.unwrap();

    let stats = h.posts.stats(post_id(7)).await.unwrap();
    assert_eq!(stats.saves, 3);
}
