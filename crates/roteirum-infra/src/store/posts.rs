//! In-memory post repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use roteirum_core::domain::{Post, PostMutation};
use roteirum_core::error::{DomainError, RepoError};
use roteirum_core::ports::{BaseRepository, PostRepository};

/// Post repository backed by a vector behind an async RwLock.
///
/// Storage order is insertion order. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            store: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => store.push(post.clone()),
        }
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn apply(&self, id: Uuid, mutation: PostMutation) -> Result<Post, DomainError> {
        // Check and write under the same guard.
        let mut store = self.store.write().await;
        let post = store
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::post_not_found(id))?;

        post.apply(mutation)?;
        Ok(post.clone())
    }
}
