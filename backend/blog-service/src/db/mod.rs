//! Store traits for the persistence collaborator.
//!
//! The service talks to a document store through one trait per collection:
//! find-by-id, find-by-filter, insert, update-by-id, delete-by-id. The
//! traits are the seam: handlers and services never see a concrete store.
//! `memory` ships the in-process implementation used by the binary and the
//! tests.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Comment, DocumentId, Post, User};

pub use memory::MemoryStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Opaque persistence failure. Handlers map these to 500s.
#[derive(Debug, Error)]
#[error("store operation failed: {0}")]
pub struct StoreError(pub String);

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn insert(&self, user: User) -> StoreResult<User>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<Post>>;
    /// All posts, newest first.
    async fn find_all(&self) -> StoreResult<Vec<Post>>;
    async fn insert(&self, post: Post) -> StoreResult<Post>;
    /// Replace the document; false when no document has this id.
    async fn update(&self, id: &DocumentId, post: Post) -> StoreResult<bool>;
    /// Remove the document; false when no document has this id.
    async fn delete(&self, id: &DocumentId) -> StoreResult<bool>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_by_id(&self, id: &DocumentId) -> StoreResult<Option<Comment>>;
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: &DocumentId) -> StoreResult<Vec<Comment>>;
    async fn insert(&self, comment: Comment) -> StoreResult<Comment>;
    async fn update(&self, id: &DocumentId, comment: Comment) -> StoreResult<bool>;
    async fn delete(&self, id: &DocumentId) -> StoreResult<bool>;
    /// Remove every comment on a post, returning how many went away.
    async fn delete_by_post(&self, post_id: &DocumentId) -> StoreResult<u64>;
}

/// Handles to every collection of the persistence collaborator.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl Stores {
    /// One shared in-memory store backing all three collections.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}
