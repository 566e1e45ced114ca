//! # Roteirum API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use roteirum_core::ports::{PasswordService, TokenService};
use roteirum_infra::{Argon2PasswordService, JwtTokenService};

#[cfg(feature = "scheduler")]
mod background;
mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(
        "Starting Roteirum API Server on {}:{}",
        config.host,
        config.port
    );

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::from_env());
    let bind = (config.host.clone(), config.port);

    let state = AppState::seeded(config, tokens.clone(), passwords)?;

    #[cfg(feature = "scheduler")]
    let mut scheduler = {
        let scheduler =
            background::Scheduler::new(background::SchedulerConfig::from_env()).await?;
        background::schedule_ranking_snapshots(&scheduler, state.ranking.clone()).await?;
        scheduler.start().await?;
        scheduler
    };

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .configure(handlers::configure_routes)
    })
    .bind(bind)?
    .run()
    .await?;

    #[cfg(feature = "scheduler")]
    scheduler.shutdown().await?;

    Ok(())
}
