//! # Roteirum Infrastructure
//!
//! Concrete implementations of the ports defined in `roteirum-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory storage only
//! - `auth` - JWT sessions + Argon2 password hashing

pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

pub use store::{
    InMemoryPostRepository, InMemoryRankingHistory, InMemoryStore, InMemoryUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
