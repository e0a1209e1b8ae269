//! Comment service - thread access follows the parent post.

use std::sync::Arc;

use chrono::Utc;

use crate::db::{CommentStore, PostStore, Stores, UserStore};
use crate::error::{AppError, Result};
use crate::middleware::permissions;
use crate::models::{Comment, CommentView, DocumentId, Identity, Post, PostView};
use crate::validators;

use super::lookup_identity;

pub struct CommentService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
    users: Arc<dyn UserStore>,
}

impl CommentService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            posts: stores.posts.clone(),
            comments: stores.comments.clone(),
            users: stores.users.clone(),
        }
    }

    async fn load_post(&self, id: &DocumentId, missing: &str) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(missing.to_string()))
    }

    /// Load a comment and check it actually belongs to the given post; a
    /// comment id under the wrong post is as good as absent.
    async fn load_comment(&self, post: &Post, id: &DocumentId) -> Result<Comment> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
        if comment.post != post.id {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        Ok(comment)
    }

    async fn post_view(&self, post: Post) -> Result<PostView> {
        let author = lookup_identity(&self.users, &post.author).await?;
        Ok(PostView::new(post, author))
    }

    async fn comment_view(&self, comment: Comment) -> Result<CommentView> {
        let author = lookup_identity(&self.users, &comment.author).await?;
        Ok(CommentView::new(comment, author))
    }

    /// Create a comment on a published post.
    pub async fn create(
        &self,
        post_id: &DocumentId,
        author: &Identity,
        text: &str,
    ) -> Result<(PostView, CommentView)> {
        let post = self
            .load_post(
                post_id,
                "Failed to create the comment because the post doesn't exist",
            )
            .await?;
        permissions::check_comment_create(&post, Some(author))?;

        let now = Utc::now();
        let comment = Comment {
            id: DocumentId::generate(),
            author: author.id.clone(),
            post: post.id.clone(),
            text: validators::sanitize(text),
            created_at: now,
            updated_at: now,
        };

        let comment = self.comments.insert(comment).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post.id, "comment created");

        let comment_view = CommentView::new(comment, author.clone());
        Ok((self.post_view(post).await?, comment_view))
    }

    /// Read a single comment.
    pub async fn get(
        &self,
        post_id: &DocumentId,
        comment_id: &DocumentId,
        requester: &Identity,
    ) -> Result<(PostView, CommentView)> {
        let post = self
            .load_post(post_id, "Can't find the comment because the post doesn't exist")
            .await?;
        let comment = self.load_comment(&post, comment_id).await?;
        permissions::check_comment_read(&post, Some(requester))?;

        Ok((
            self.post_view(post).await?,
            self.comment_view(comment).await?,
        ))
    }

    /// List a post's comments, oldest first.
    pub async fn list(
        &self,
        post_id: &DocumentId,
        requester: &Identity,
    ) -> Result<(PostView, Vec<CommentView>)> {
        let post = self
            .load_post(post_id, "Can't find comments because the post doesn't exist")
            .await?;
        permissions::check_comment_read(&post, Some(requester))?;

        let comments = self.comments.find_by_post(&post.id).await?;
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(self.comment_view(comment).await?);
        }

        Ok((self.post_view(post).await?, views))
    }

    /// Replace a comment's text. Comment-author-only, published post only;
    /// `author`, `post` and `created_at` are copied forward.
    pub async fn update(
        &self,
        post_id: &DocumentId,
        comment_id: &DocumentId,
        requester: &Identity,
        text: &str,
    ) -> Result<(PostView, CommentView)> {
        let post = self
            .load_post(
                post_id,
                "Can't update the comment because the post doesn't exist",
            )
            .await?;
        let existing = self.load_comment(&post, comment_id).await?;
        permissions::check_comment_mutation(&post, &existing, Some(requester))?;

        let updated = Comment {
            id: existing.id.clone(),
            author: existing.author.clone(),
            post: existing.post.clone(),
            text: validators::sanitize(text),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        if !self.comments.update(comment_id, updated.clone()).await? {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }

        Ok((
            self.post_view(post).await?,
            self.comment_view(updated).await?,
        ))
    }

    /// Delete a comment. Comment-author-only, published post only.
    pub async fn delete(
        &self,
        post_id: &DocumentId,
        comment_id: &DocumentId,
        requester: &Identity,
    ) -> Result<(PostView, CommentView)> {
        let post = self
            .load_post(
                post_id,
                "Can't delete the comment because the post doesn't exist",
            )
            .await?;
        let existing = self.load_comment(&post, comment_id).await?;
        permissions::check_comment_mutation(&post, &existing, Some(requester))?;

        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, post_id = %post_id, "comment deleted");

        Ok((
            self.post_view(post).await?,
            self.comment_view(existing).await?,
        ))
    }
}
