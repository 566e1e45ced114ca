//! Feed queries and post interactions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Post, PostMutation, User};
use crate::error::DomainError;
use crate::pagination::Page;
use crate::ports::{PostRepository, UserRepository};
use crate::query::PostQuery;

/// Interaction counters of a single post.
#[derive(Debug, Clone)]
pub struct PostStats {
    pub likes: u32,
    pub saves: u32,
    pub comments: usize,
    pub liked_by: HashSet<Uuid>,
    pub saved_by: HashSet<Uuid>,
}

/// Post use cases, written against the repository ports.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    share_base_url: String,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        share_base_url: impl Into<String>,
    ) -> Self {
        Self {
            posts,
            users,
            share_base_url: share_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// All users keyed by id, for resolving authors.
    pub async fn authors(&self) -> Result<HashMap<Uuid, User>, DomainError> {
        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    /// Posts matching the query, newest first.
    pub async fn filtered(&self, query: &PostQuery) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.list().await?;
        let authors = if query.search.is_some() {
            self.authors().await?
        } else {
            HashMap::new()
        };

        let mut matched = query.apply(&posts, &authors);
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    /// One page of the feed starting at `offset`.
    pub async fn feed(
        &self,
        query: &PostQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Post>, DomainError> {
        let matched = self.filtered(query).await?;
        let page = Page::slice(&matched, offset, limit);
        tracing::debug!(
            total = page.total,
            offset,
            returned = page.items.len(),
            "Feed page served"
        );
        Ok(page)
    }

    async fn mutate(&self, post_id: Uuid, mutation: PostMutation) -> Result<Post, DomainError> {
        let result = self.posts.apply(post_id, mutation).await;
        if let Err(e) = &result {
            tracing::debug!(post_id = %post_id, error = %e, "Post mutation rejected");
        }
        result
    }

    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, DomainError> {
        self.mutate(post_id, PostMutation::Like(user_id)).await
    }

    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, DomainError> {
        self.mutate(post_id, PostMutation::Unlike(user_id)).await
    }

    pub async fn save(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, DomainError> {
        self.mutate(post_id, PostMutation::Save(user_id)).await
    }

    pub async fn unsave(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, DomainError> {
        self.mutate(post_id, PostMutation::Unsave(user_id)).await
    }

    /// Add a comment. The post and the author must exist and the text must
    /// not be blank.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<(Comment, Post), DomainError> {
        self.get(post_id).await?;
        self.users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(author_id))?;

        let comment = Comment::new(post_id, author_id, content)?;
        let post = self
            .mutate(post_id, PostMutation::Comment(comment.clone()))
            .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        Ok((comment, post))
    }

    /// Comments of a post, oldest first.
    pub async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let mut comments = self.get(post_id).await?.comments;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    pub async fn stats(&self, post_id: Uuid) -> Result<PostStats, DomainError> {
        let post = self.get(post_id).await?;
        Ok(PostStats {
            likes: post.likes,
            saves: post.saves,
            comments: post.comment_count(),
            liked_by: post.liked_by,
            saved_by: post.saved_by,
        })
    }

    /// Public link to a post.
    pub async fn share(&self, post_id: Uuid) -> Result<String, DomainError> {
        let post = self.get(post_id).await?;
        Ok(format!("{}/post/{}", self.share_base_url, post.id))
    }

    /// Posts the user liked, most recently updated first.
    pub async fn liked_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.filtered(&PostQuery::new().liked_by(user_id)).await?;
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    /// Posts the user saved, most recently updated first.
    pub async fn saved_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.filtered(&PostQuery::new().saved_by(user_id)).await?;
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    /// Posts the user authored, newest first.
    pub async fn authored_by(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        self.filtered(&PostQuery::new().by_author(user_id)).await
    }
}
