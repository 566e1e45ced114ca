//! In-memory user repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use roteirum_core::domain::User;
use roteirum_core::error::RepoError;
use roteirum_core::ports::{BaseRepository, UserRepository};

pub struct InMemoryUserRepository {
    store: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            store: RwLock::new(users),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store
            .iter()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepoError::Constraint(format!(
                "email {} already registered",
                user.email
            )));
        }

        match store.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => store.push(user.clone()),
        }
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
