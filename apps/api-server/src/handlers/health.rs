//! Liveness plus a look at the in-memory store.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use roteirum_core::error::DomainError;
use roteirum_core::query::PostQuery;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub posts: usize,
    pub users: usize,
}

async fn store_counts(state: &AppState) -> Result<(usize, usize), DomainError> {
    let posts = state.posts.filtered(&PostQuery::default()).await?.len();
    let users = state.posts.authors().await?.len();
    Ok((posts, users))
}

/// GET /api/health
///
/// Answers 503 when the store cannot be read.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, posts, users) = match store_counts(&state).await {
        Ok((posts, users)) => ("ok", posts, users),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not read the store");
            ("unavailable", 0, 0)
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        posts,
        users,
    };

    if status == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
