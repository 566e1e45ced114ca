//! Feed and post interaction handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use roteirum_core::domain::{Post, PostType};
use roteirum_core::query::PostQuery;
use roteirum_shared::ApiResponse;
use roteirum_shared::dto::{AddCommentRequest, CommentAddedResponse, FeedQuery, ShareResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

fn to_post_query(params: &FeedQuery) -> AppResult<PostQuery> {
    let mut query = PostQuery::new();
    if let Some(kind) = params.post_type.as_deref().filter(|s| !s.is_empty()) {
        query = query.of_type(kind.parse::<PostType>()?);
    }
    if let Some(author) = params.author {
        query = query.by_author(author);
    }
    if let Some(tag) = params.tag.as_deref().filter(|s| !s.is_empty()) {
        query = query.with_tag(tag);
    }
    if let Some(text) = params.q.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.search(text);
    }
    Ok(query)
}

/// GET /api/posts?type&author&tag&q&cursor&limit
pub async fn feed(
    state: web::Data<AppState>,
    params: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let query = to_post_query(&params)?;
    let offset = params.cursor.unwrap_or(0);
    let limit = params.limit.unwrap_or(state.config.posts_page_size);

    let page = state.posts.feed(&query, offset, limit).await?;
    let authors = state.posts.authors().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::page(page, &authors))))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    post_reply(&state, &post, None).await
}

/// GET /api/posts/{id}/comments
pub async fn comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.posts.comments(path.into_inner()).await?;
    let authors = state.posts.authors().await?;
    let body: Vec<_> = comments
        .iter()
        .map(|c| views::comment(c, &authors))
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let (comment, post) = state
        .posts
        .add_comment(path.into_inner(), identity.user_id, &body.content)
        .await?;
    let authors = state.posts.authors().await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        CommentAddedResponse {
            comment: views::comment(&comment, &authors),
            comment_count: post.comment_count(),
        },
        "Comment added",
    )))
}

/// GET /api/posts/{id}/stats
pub async fn stats(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let stats = state.posts.stats(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::stats(&stats))))
}

/// POST /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.like(path.into_inner(), identity.user_id).await?;
    post_reply(&state, &post, Some("Post liked")).await
}

/// POST /api/posts/{id}/unlike
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .unlike(path.into_inner(), identity.user_id)
        .await?;
    post_reply(&state, &post, Some("Like removed")).await
}

/// POST /api/posts/{id}/save
pub async fn save(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.save(path.into_inner(), identity.user_id).await?;
    post_reply(&state, &post, Some("Post saved")).await
}

/// POST /api/posts/{id}/unsave
pub async fn unsave(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .unsave(path.into_inner(), identity.user_id)
        .await?;
    post_reply(&state, &post, Some("Post removed from saved")).await
}

/// POST /api/posts/{id}/share
pub async fn share(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let share_url = state.posts.share(post_id).await?;
    tracing::debug!(post_id = %post_id, user_id = %identity.user_id, "Share link issued");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ShareResponse { share_url })))
}

async fn post_reply(
    state: &AppState,
    post: &Post,
    message: Option<&str>,
) -> AppResult<HttpResponse> {
    let authors = state.posts.authors().await?;
    let body = views::post(post, &authors);
    Ok(HttpResponse::Ok().json(match message {
        Some(message) => ApiResponse::ok_with_message(body, message),
        None => ApiResponse::ok(body),
    }))
}
