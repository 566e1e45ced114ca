//! # Roteirum Core
//!
//! The domain layer of Roteirum.
//! This crate holds the entities, the ranking and filtering rules, and the
//! services built on the repository ports. It has no infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod gate;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod ranking;
pub mod services;

pub use error::{DomainError, RepoError};
