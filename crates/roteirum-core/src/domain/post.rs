use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The closed set of content kinds a post can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostType {
    Synopsis,
    Poster,
    AiImage,
}

impl PostType {
    pub const ALL: [PostType; 3] = [PostType::Synopsis, PostType::Poster, PostType::AiImage];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Synopsis => "synopsis",
            PostType::Poster => "poster",
            PostType::AiImage => "ai-image",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synopsis" => Ok(PostType::Synopsis),
            "poster" => Ok(PostType::Poster),
            "ai-image" => Ok(PostType::AiImage),
            other => Err(DomainError::Validation(format!(
                "unknown post type '{other}'"
            ))),
        }
    }
}

/// A comment left on a post. Comments are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment, trimming the text. Blank text is rejected.
    pub fn new(post_id: Uuid, author_id: Uuid, content: &str) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyComment);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// A single atomic change to a post, applied by a repository under its lock.
#[derive(Debug, Clone)]
pub enum PostMutation {
    Like(Uuid),
    Unlike(Uuid),
    Save(Uuid),
    Unsave(Uuid),
    Comment(Comment),
}

/// Post entity - a synopsis, poster or AI image shared by a user.
///
/// `likes` and `saves` always equal the size of `liked_by` and `saved_by`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub likes: u32,
    pub liked_by: HashSet<Uuid>,
    pub saves: u32,
    pub saved_by: HashSet<Uuid>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with no interactions.
    pub fn new(
        author_id: Uuid,
        post_type: PostType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_type,
            title: title.into(),
            content: content.into(),
            image_url: None,
            tags: Vec::new(),
            likes: 0,
            liked_by: HashSet::new(),
            saves: 0,
            saved_by: HashSet::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Backdate the post. Also resets `updated_at`.
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }

    pub fn is_saved_by(&self, user_id: Uuid) -> bool {
        self.saved_by.contains(&user_id)
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Apply a mutation. On error the post is left untouched.
    pub fn apply(&mut self, mutation: PostMutation) -> Result<(), DomainError> {
        match mutation {
            PostMutation::Like(user_id) => {
                if !self.liked_by.insert(user_id) {
                    return Err(DomainError::AlreadyLiked);
                }
            }
            PostMutation::Unlike(user_id) => {
                if !self.liked_by.remove(&user_id) {
                    return Err(DomainError::NotLiked);
                }
            }
            PostMutation::Save(user_id) => {
                if !self.saved_by.insert(user_id) {
                    return Err(DomainError::AlreadySaved);
                }
            }
            PostMutation::Unsave(user_id) => {
                if !self.saved_by.remove(&user_id) {
                    return Err(DomainError::NotSaved);
                }
            }
            PostMutation::Comment(comment) => {
                if comment.post_id != self.id {
                    return Err(DomainError::Validation(
                        "comment belongs to another post".to_string(),
                    ));
                }
                self.comments.push(comment);
            }
        }

        self.likes = self.liked_by.len() as u32;
        self.saves = self.saved_by.len() as u32;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post::new(Uuid::new_v4(), PostType::Synopsis, "O Último Algoritmo", "...")
    }

    #[test]
    fn test_like_then_unlike_restores_state() {
        let mut post = post();
        let user = Uuid::new_v4();
        let before = (post.likes, post.liked_by.clone());

        post.apply(PostMutation::Like(user)).unwrap();
        assert_eq!(post.likes, 1);
        assert!(post.is_liked_by(user));

        post.apply(PostMutation::Unlike(user)).unwrap();
        assert_eq!((post.likes, post.liked_by.clone()), before);
    }

    #[test]
    fn test_double_like_is_rejected_without_change() {
        let mut post = post();
        let user = Uuid::new_v4();
        post.apply(PostMutation::Like(user)).unwrap();
        let snapshot = post.clone();

        let err = post.apply(PostMutation::Like(user)).unwrap_err();

        assert!(matches!(err, DomainError::AlreadyLiked));
        assert!(err.to_string().contains("already liked"));
        assert_eq!(post, snapshot);
    }

    #[test]
    fn test_unsave_without_save_fails() {
        let mut post = post();
        let err = post.apply(PostMutation::Unsave(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, DomainError::NotSaved));
        assert_eq!(post.saves, 0);
    }

    #[test]
    fn test_counts_track_sets() {
        let mut post = post();
        for _ in 0..3 {
            post.apply(PostMutation::Save(Uuid::new_v4())).unwrap();
        }
        post.apply(PostMutation::Like(Uuid::new_v4())).unwrap();

        assert_eq!(post.saves as usize, post.saved_by.len());
        assert_eq!(post.likes as usize, post.liked_by.len());
    }

    #[test]
    fn test_blank_comment_rejected() {
        let result = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "   \n");
        assert!(matches!(result, Err(DomainError::EmptyComment)));
    }

    #[test]
    fn test_comment_is_trimmed_and_appended() {
        let mut post = post();
        let comment = Comment::new(post.id, Uuid::new_v4(), "  Conceito incrível!  ").unwrap();

        post.apply(PostMutation::Comment(comment)).unwrap();

        assert_eq!(post.comment_count(), 1);
        assert_eq!(post.comments[0].content, "Conceito incrível!");
    }

    #[test]
    fn test_post_type_round_trips_through_str() {
        for ty in PostType::ALL {
            assert_eq!(ty.as_str().parse::<PostType>().unwrap(), ty);
        }
        assert!("video".parse::<PostType>().is_err());
    }
}
