//! In-memory storage and seed data.

pub mod fixtures;
mod history;
mod posts;
mod users;

use std::sync::Arc;

pub use fixtures::{FIXTURE_PASSWORD, Seed, SeedError};
pub use history::InMemoryRankingHistory;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;

/// The three in-memory stores, loaded together.
#[derive(Clone)]
pub struct InMemoryStore {
    pub posts: Arc<InMemoryPostRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub history: Arc<InMemoryRankingHistory>,
}

impl InMemoryStore {
    pub fn from_seed(seed: Seed) -> Self {
        tracing::info!(
            users = seed.users.len(),
            posts = seed.posts.len(),
            "In-memory store initialized"
        );

        Self {
            posts: Arc::new(InMemoryPostRepository::with_posts(seed.posts)),
            users: Arc::new(InMemoryUserRepository::with_users(seed.users)),
            history: Arc::new(InMemoryRankingHistory::new()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use roteirum_core::ports::{AuthError, PasswordService};

    /// Skips Argon2 to keep fixture tests fast.
    pub(crate) struct PlainPasswords;

    impl PasswordService for PlainPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash.strip_prefix("plain:") == Some(password))
        }
    }
}

#[cfg(test)]
mod tests;
