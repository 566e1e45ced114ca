//! Application state - shared across all handlers.

use std::sync::Arc;

use roteirum_core::ports::{PasswordService, TokenService};
use roteirum_core::services::{AuthService, PostService, RankingService};
use roteirum_infra::store::{InMemoryStore, SeedError, fixtures};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub ranking: RankingService,
    pub auth: AuthService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the services over an already loaded store.
    pub fn new(
        config: AppConfig,
        store: &InMemoryStore,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let posts = PostService::new(
            store.posts.clone(),
            store.users.clone(),
            config.public_base_url.clone(),
        );
        let ranking = RankingService::new(
            store.posts.clone(),
            store.users.clone(),
            store.history.clone(),
        )
        .with_trending_window(config.trending_window_days);
        let auth = AuthService::new(store.users.clone(), tokens, passwords);

        Self {
            posts,
            ranking,
            auth,
            config: Arc::new(config),
        }
    }

    /// Load the fixture data set and wire the services over it.
    pub fn seeded(
        config: AppConfig,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, SeedError> {
        let seed = fixtures::load(passwords.as_ref(), &config.seed_password)?;
        let store = InMemoryStore::from_seed(seed);

        tracing::info!("Application state initialized");
        Ok(Self::new(config, &store, tokens, passwords))
    }
}
