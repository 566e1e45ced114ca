use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostMutation, RankingPeriod, RankingSnapshot, User};
use crate::error::{DomainError, RepoError};

/// Generic repository trait defining the standard read/write operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, in storage order.
    async fn list(&self) -> Result<Vec<T>, RepoError>;

    /// Save an entity (create or replace).
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Apply a mutation atomically and return the updated post.
    ///
    /// The check (e.g. "already liked") and the write happen under one
    /// lock acquisition, so repeated calls by the same user never double count.
    async fn apply(&self, id: Uuid, mutation: PostMutation) -> Result<Post, DomainError>;
}

/// Storage for ranking baselines.
#[async_trait]
pub trait RankingHistory: Send + Sync {
    /// Most recent snapshot for the period, if any.
    async fn latest(&self, period: RankingPeriod) -> Result<Option<RankingSnapshot>, RepoError>;

    /// Record a snapshot, replacing the previous one for its period.
    async fn record(&self, snapshot: RankingSnapshot) -> Result<(), RepoError>;
}
