//! Authentication handlers.

use actix_web::{HttpResponse, http::header, web};

use roteirum_core::gate::{self, GateDecision, RouteAccess};
use roteirum_shared::ApiResponse;
use roteirum_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// Where callers land when they hit a guest-only route with a session.
const DEFAULT_VIEW: &str = "/api/posts";

/// POST /api/auth/login - guest only
pub async fn login(
    state: web::Data<AppState>,
    session: OptionalIdentity,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let access = gate::decide(RouteAccess::GuestOnly, session.0.is_some());
    if access == GateDecision::RedirectToDefault {
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, DEFAULT_VIEW))
            .finish());
    }

    let req = body.into_inner();
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        AuthResponse {
            access_token: session.token,
            token_type: "Bearer".to_string(),
            expires_in: u64::try_from(session.expires_in).unwrap_or_default(),
            user: views::user(&session.user),
        },
        "Login successful",
    )))
}

/// POST /api/auth/logout
///
/// Sessions are stateless tokens; the client discards its copy.
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::info!(user_id = %identity.user_id, email = %identity.email, "User logged out");
    HttpResponse::Ok().json(ApiResponse::message("Logout successful"))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.auth.current_user(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::user(&user))))
}
