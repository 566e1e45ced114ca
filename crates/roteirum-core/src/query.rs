//! Post filtering.
//!
//! Every function here is pure: it takes a slice of posts and returns the
//! matching subset in input order. A filter that matches nothing yields an
//! empty vector, never an error.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{Post, PostType, User};

/// Criteria for selecting posts. Criteria that are set are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    pub post_type: Option<PostType>,
    pub author_id: Option<Uuid>,
    pub liked_by: Option<Uuid>,
    pub saved_by: Option<Uuid>,
    /// Matches posts carrying any of these tags.
    pub tags: Vec<String>,
    /// Case-insensitive substring over title, content, tags and author name.
    pub search: Option<String>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, post_type: PostType) -> Self {
        self.post_type = Some(post_type);
        self
    }

    pub fn by_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn liked_by(mut self, user_id: Uuid) -> Self {
        self.liked_by = Some(user_id);
        self
    }

    pub fn saved_by(mut self, user_id: Uuid) -> Self {
        self.saved_by = Some(user_id);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.post_type.is_none()
            && self.author_id.is_none()
            && self.liked_by.is_none()
            && self.saved_by.is_none()
            && self.tags.is_empty()
            && self.search.as_deref().is_none_or(|s| s.trim().is_empty())
    }

    /// Whether a post satisfies every criterion.
    ///
    /// `authors` resolves author names for the free-text search; a missing
    /// author simply never matches by name.
    pub fn matches(&self, post: &Post, authors: &HashMap<Uuid, User>) -> bool {
        if self.post_type.is_some_and(|t| post.post_type != t) {
            return false;
        }
        if self.author_id.is_some_and(|a| post.author_id != a) {
            return false;
        }
        if self.liked_by.is_some_and(|u| !post.is_liked_by(u)) {
            return false;
        }
        if self.saved_by.is_some_and(|u| !post.is_saved_by(u)) {
            return false;
        }
        if !self.tags.is_empty() && !has_any_tag(post, &self.tags) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                let author_name = authors.get(&post.author_id).map(|u| u.name.as_str());
                matches_text(post, author_name, text)
            }
            _ => true,
        }
    }

    /// Apply the query to a collection.
    pub fn apply(&self, posts: &[Post], authors: &HashMap<Uuid, User>) -> Vec<Post> {
        posts
            .iter()
            .filter(|p| self.matches(p, authors))
            .cloned()
            .collect()
    }
}

fn has_any_tag(post: &Post, tags: &[String]) -> bool {
    tags.iter().any(|wanted| {
        let wanted = wanted.to_lowercase();
        post.tags.iter().any(|t| t.to_lowercase() == wanted)
    })
}

fn matches_text(post: &Post, author_name: Option<&str>, text: &str) -> bool {
    let needle = text.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.content.to_lowercase().contains(&needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        || author_name.is_some_and(|n| n.to_lowercase().contains(&needle))
}

pub fn by_type(posts: &[Post], post_type: PostType) -> Vec<Post> {
    PostQuery::new().of_type(post_type).apply(posts, &HashMap::new())
}

pub fn by_author(posts: &[Post], author_id: Uuid) -> Vec<Post> {
    PostQuery::new().by_author(author_id).apply(posts, &HashMap::new())
}

pub fn liked_by(posts: &[Post], user_id: Uuid) -> Vec<Post> {
    PostQuery::new().liked_by(user_id).apply(posts, &HashMap::new())
}

pub fn saved_by(posts: &[Post], user_id: Uuid) -> Vec<Post> {
    PostQuery::new().saved_by(user_id).apply(posts, &HashMap::new())
}

pub fn by_tags(posts: &[Post], tags: &[String]) -> Vec<Post> {
    let query = PostQuery {
        tags: tags.to_vec(),
        ..PostQuery::default()
    };
    query.apply(posts, &HashMap::new())
}

pub fn search(posts: &[Post], authors: &HashMap<Uuid, User>, text: &str) -> Vec<Post> {
    PostQuery::new().search(text).apply(posts, authors)
}
