//! Post service - fetch, policy check, mutate.

use std::sync::Arc;

use chrono::Utc;

use crate::db::{CommentStore, PostStore, Stores, UserStore};
use crate::error::{AppError, Result};
use crate::middleware::permissions;
use crate::models::{DocumentId, Identity, Post, PostView};
use crate::validators;

use super::lookup_identity;

pub struct PostService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            posts: stores.posts.clone(),
            comments: stores.comments.clone(),
            users: stores.users.clone(),
        }
    }

    async fn load(&self, id: &DocumentId) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// Create a post owned by the caller. `published` defaults to false.
    pub async fn create(
        &self,
        author: &Identity,
        title: &str,
        content: &str,
        published: Option<bool>,
    ) -> Result<PostView> {
        let now = Utc::now();
        let post = Post {
            id: DocumentId::generate(),
            author: author.id.clone(),
            title: validators::sanitize(title),
            content: validators::sanitize(content),
            published: published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, author = %author.username, "post created");
        Ok(PostView::new(post, author.clone()))
    }

    /// Read a single post, subject to the visibility rules.
    pub async fn get(&self, id: &DocumentId, requester: Option<&Identity>) -> Result<PostView> {
        let post = self.load(id).await?;
        permissions::check_post_read(&post, requester)?;

        let author = lookup_identity(&self.users, &post.author).await?;
        Ok(PostView::new(post, author))
    }

    /// List every post the requester may see: all published posts, plus
    /// the requester's own drafts when authenticated. Newest first.
    pub async fn list(&self, requester: Option<&Identity>) -> Result<Vec<PostView>> {
        let posts = self.posts.find_all().await?;

        let mut views = Vec::new();
        for post in posts
            .into_iter()
            .filter(|post| permissions::post_visible(post, requester))
        {
            let author = lookup_identity(&self.users, &post.author).await?;
            views.push(PostView::new(post, author));
        }
        Ok(views)
    }

    /// Replace a post's content. Owner-only; `author` and `created_at`
    /// are copied forward from the stored record, never taken from the
    /// client. Omitting `published` leaves the current state untouched.
    pub async fn update(
        &self,
        id: &DocumentId,
        requester: &Identity,
        title: &str,
        content: &str,
        published: Option<bool>,
    ) -> Result<PostView> {
        let existing = self.load(id).await?;
        permissions::check_post_mutation(&existing, Some(requester))?;

        let updated = Post {
            id: existing.id.clone(),
            author: existing.author.clone(),
            title: validators::sanitize(title),
            content: validators::sanitize(content),
            published: published.unwrap_or(existing.published),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        if !self.posts.update(id, updated.clone()).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let author = lookup_identity(&self.users, &updated.author).await?;
        Ok(PostView::new(updated, author))
    }

    /// Delete a post and its comment thread. Owner-only.
    pub async fn delete(&self, id: &DocumentId, requester: &Identity) -> Result<()> {
        let existing = self.load(id).await?;
        permissions::check_post_mutation(&existing, Some(requester))?;

        self.posts.delete(id).await?;
        let orphaned = self.comments.delete_by_post(id).await?;
        tracing::info!(post_id = %id, comments_removed = orphaned, "post deleted");
        Ok(())
    }
}
