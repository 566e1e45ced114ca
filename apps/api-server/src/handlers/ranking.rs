//! Leaderboard handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use roteirum_core::domain::RankingPeriod;
use roteirum_core::ranking::FULL_LIMIT;
use roteirum_core::services::DEFAULT_TRENDING_LIMIT;
use roteirum_shared::ApiResponse;
use roteirum_shared::dto::{LimitQuery, PeriodQuery, RankingQuery};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// Unknown or missing periods fall back to the monthly board.
fn period_of(raw: Option<&str>) -> RankingPeriod {
    raw.map(RankingPeriod::parse_or_default).unwrap_or_default()
}

/// GET /api/ranking?period&limit
pub async fn leaderboard(
    state: web::Data<AppState>,
    params: web::Query<RankingQuery>,
) -> AppResult<HttpResponse> {
    let period = period_of(params.period.as_deref());
    let limit = params
        .limit
        .unwrap_or(state.config.ranking_default_limit)
        .min(FULL_LIMIT);

    let board = state.ranking.leaderboard(period, limit).await?;
    let authors = state.posts.authors().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::leaderboard(&board, &authors))))
}

/// GET /api/ranking/stats?period
pub async fn stats(
    state: web::Data<AppState>,
    params: web::Query<PeriodQuery>,
) -> AppResult<HttpResponse> {
    let stats = state
        .ranking
        .stats(period_of(params.period.as_deref()))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::ranking_stats(&stats))))
}

/// GET /api/ranking/trending?limit
pub async fn trending(
    state: web::Data<AppState>,
    params: web::Query<LimitQuery>,
) -> AppResult<HttpResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
    let entries = state.ranking.trending(limit).await?;
    let authors = state.posts.authors().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::trending(&entries, &authors))))
}

/// GET /api/ranking/position/{id}?period
pub async fn position(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<PeriodQuery>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let period = period_of(params.period.as_deref());

    // Unknown posts are a 404 rather than an unranked result.
    state.posts.get(post_id).await?;
    let position = state.ranking.position(post_id, period).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::position(post_id, period, &position))))
}

/// POST /api/ranking/snapshot?period
///
/// Records the current order as the baseline for position changes. Without a
/// period every board is snapshotted.
pub async fn snapshot(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<PeriodQuery>,
) -> AppResult<HttpResponse> {
    tracing::info!(user_id = %identity.user_id, "Manual ranking snapshot requested");

    let snapshots = match params.period.as_deref() {
        Some(raw) => vec![
            state
                .ranking
                .take_snapshot(RankingPeriod::parse_or_default(raw))
                .await?,
        ],
        None => state.ranking.snapshot_all().await?,
    };

    let body: Vec<_> = snapshots.iter().map(views::snapshot).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body, "Ranking snapshot recorded")))
}
