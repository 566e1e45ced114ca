//! HTTP handlers and route configuration.

mod auth;
mod health;
mod me;
mod posts;
mod ranking;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, req| AppError::bad_request(req, err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, req| AppError::bad_request(req, err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, req| AppError::bad_request(req, err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::feed))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}/comments", web::get().to(posts::comments))
                    .route("/{id}/comments", web::post().to(posts::add_comment))
                    .route("/{id}/stats", web::get().to(posts::stats))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/unlike", web::post().to(posts::unlike))
                    .route("/{id}/save", web::post().to(posts::save))
                    .route("/{id}/unsave", web::post().to(posts::unsave))
                    .route("/{id}/share", web::post().to(posts::share)),
            )
            .service(
                web::scope("/me")
                    .route("/liked", web::get().to(me::liked))
                    .route("/saved", web::get().to(me::saved))
                    .route("/posts", web::get().to(me::authored)),
            )
            .service(
                web::scope("/ranking")
                    .route("", web::get().to(ranking::leaderboard))
                    .route("/stats", web::get().to(ranking::stats))
                    .route("/trending", web::get().to(ranking::trending))
                    .route("/position/{id}", web::get().to(ranking::position))
                    .route("/snapshot", web::post().to(ranking::snapshot)),
            ),
    );
}
