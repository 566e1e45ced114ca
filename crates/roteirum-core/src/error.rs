//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
///
/// All of these are recoverable; callers surface the message to the user.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("Post was not liked")]
    NotLiked,

    #[error("Post already saved")]
    AlreadySaved,

    #[error("Post was not saved")]
    NotSaved,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found or inactive")]
    InactiveAccount,

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "User",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
