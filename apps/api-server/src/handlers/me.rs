//! The session user's collections.

use actix_web::{HttpResponse, web};

use roteirum_core::domain::Post;
use roteirum_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET /api/me/liked
pub async fn liked(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.liked_by_user(identity.user_id).await?;
    collection(&state, &posts).await
}

/// GET /api/me/saved
pub async fn saved(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.saved_by_user(identity.user_id).await?;
    collection(&state, &posts).await
}

/// GET /api/me/posts
pub async fn authored(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.authored_by(identity.user_id).await?;
    collection(&state, &posts).await
}

async fn collection(state: &AppState, posts: &[Post]) -> AppResult<HttpResponse> {
    let authors = state.posts.authors().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::posts(posts, &authors))))
}
