//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use roteirum_core::pagination::DEFAULT_PAGE_SIZE;
use roteirum_core::ranking::DEFAULT_LIMIT;
use roteirum_core::services::DEFAULT_TRENDING_WINDOW_DAYS;
use roteirum_infra::store::FIXTURE_PASSWORD;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base of the links handed out by the share endpoint.
    pub public_base_url: String,
    pub posts_page_size: usize,
    pub ranking_default_limit: usize,
    pub trending_window_days: i64,
    /// Password given to every seeded account.
    pub seed_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_base_url: "http://127.0.0.1:8080".to_string(),
            posts_page_size: DEFAULT_PAGE_SIZE,
            ranking_default_limit: DEFAULT_LIMIT,
            trending_window_days: DEFAULT_TRENDING_WINDOW_DAYS,
            seed_password: FIXTURE_PASSWORD.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parsed("PORT", defaults.port);

        Self {
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}")),
            posts_page_size: parsed("POSTS_PAGE_SIZE", defaults.posts_page_size).max(1),
            ranking_default_limit: parsed("RANKING_DEFAULT_LIMIT", defaults.ranking_default_limit),
            trending_window_days: parsed("TRENDING_WINDOW_DAYS", defaults.trending_window_days),
            seed_password: env::var("SEED_PASSWORD").unwrap_or(defaults.seed_password),
            host,
            port,
        }
    }
}

/// Read and parse a variable, falling back to `default` when unset or malformed.
fn parsed<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring malformed configuration value");
            default
        }),
        Err(_) => default,
    }
}
