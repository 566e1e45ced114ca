//! Seed data loaded at startup.
//!
//! Timestamps in the seed file are relative ("N days ago") so the ranking
//! periods stay populated no matter when the process starts. Ids are
//! deterministic so clients and tests can address fixture records.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use roteirum_core::domain::{Comment, Post, PostType, User};
use roteirum_core::ports::{AuthError, PasswordService};

const SEED: &str = include_str!("seed.json");

/// Password shared by every fixture account. Test fixture only.
pub const FIXTURE_PASSWORD: &str = "123456";

const USER_NAMESPACE: u128 = 0x0001 << 64;
const POST_NAMESPACE: u128 = 0x0002 << 64;
const COMMENT_NAMESPACE: u128 = 0x0003 << 64;

/// Hours subtracted from every post timestamp so seeded comments never lie
/// in the future.
const POST_OFFSET_HOURS: i64 = 6;

pub fn user_id(n: u32) -> Uuid {
    Uuid::from_u128(USER_NAMESPACE | u128::from(n))
}

pub fn post_id(n: u32) -> Uuid {
    Uuid::from_u128(POST_NAMESPACE | u128::from(n))
}

fn comment_id(n: u32) -> Uuid {
    Uuid::from_u128(COMMENT_NAMESPACE | u128::from(n))
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to hash fixture password: {0}")]
    Hash(#[from] AuthError),

    #[error("Seed references unknown user {0}")]
    UnknownUser(u32),
}

#[derive(Deserialize)]
struct SeedFile {
    users: Vec<SeedUser>,
    posts: Vec<SeedPost>,
}

#[derive(Deserialize)]
struct SeedUser {
    id: u32,
    name: String,
    email: String,
    avatar: Option<String>,
    bio: Option<String>,
    joined_days_ago: i64,
    active: bool,
}

#[derive(Deserialize)]
struct SeedPost {
    id: u32,
    author: u32,
    #[serde(rename = "type")]
    post_type: PostType,
    title: String,
    content: String,
    image_url: Option<String>,
    tags: Vec<String>,
    liked_by: Vec<u32>,
    saved_by: Vec<u32>,
    comments: Vec<SeedComment>,
    created_days_ago: i64,
}

#[derive(Deserialize)]
struct SeedComment {
    id: u32,
    author: u32,
    content: String,
    minutes_after: i64,
}

/// Users and posts ready to load into repositories.
#[derive(Debug, Clone)]
pub struct Seed {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

/// Build the fixture data set. Every account gets `password`.
pub fn load(passwords: &dyn PasswordService, password: &str) -> Result<Seed, SeedError> {
    load_at(passwords, password, Utc::now())
}

pub fn load_at(
    passwords: &dyn PasswordService,
    password: &str,
    now: DateTime<Utc>,
) -> Result<Seed, SeedError> {
    let file: SeedFile = serde_json::from_str(SEED)?;
    let password_hash = passwords.hash(password)?;

    let users: Vec<User> = file
        .users
        .into_iter()
        .map(|u| User {
            id: user_id(u.id),
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            bio: u.bio,
            password_hash: password_hash.clone(),
            is_active: u.active,
            created_at: now - Duration::days(u.joined_days_ago),
        })
        .collect();

    let known: HashSet<Uuid> = users.iter().map(|u| u.id).collect();
    let resolve = |n: u32| -> Result<Uuid, SeedError> {
        let id = user_id(n);
        if known.contains(&id) {
            Ok(id)
        } else {
            Err(SeedError::UnknownUser(n))
        }
    };

    let mut posts = Vec::with_capacity(file.posts.len());
    for p in file.posts {
        let created_at =
            now - Duration::days(p.created_days_ago) - Duration::hours(POST_OFFSET_HOURS);
        let id = post_id(p.id);

        let liked_by: HashSet<Uuid> = p
            .liked_by
            .into_iter()
            .map(&resolve)
            .collect::<Result<_, _>>()?;
        let saved_by: HashSet<Uuid> = p
            .saved_by
            .into_iter()
            .map(&resolve)
            .collect::<Result<_, _>>()?;
        let comments = p
            .comments
            .into_iter()
            .map(|c| -> Result<Comment, SeedError> {
                Ok(Comment {
                    id: comment_id(c.id),
                    post_id: id,
                    author_id: resolve(c.author)?,
                    content: c.content,
                    created_at: created_at + Duration::minutes(c.minutes_after),
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        let mut post = Post::new(resolve(p.author)?, p.post_type, p.title, p.content)
            .with_tags(p.tags)
            .created(created_at);
        post.id = id;
        post.image_url = p.image_url;
        post.liked_by = liked_by;
        post.saved_by = saved_by;
        post.likes = post.liked_by.len() as u32;
        post.saves = post.saved_by.len() as u32;
        post.comments = comments;
        posts.push(post);
    }

    tracing::debug!(users = users.len(), posts = posts.len(), "Fixture data loaded");
    Ok(Seed { users, posts })
}
