//! Data models for the blog service.
//!
//! Entities (`User`, `Post`, `Comment`) mirror the documents held by the
//! persistence collaborator. `Identity` is the minimal projection of a
//! user that tokens and responses carry; the full `User` (with its
//! password hash) never leaves the service. Response projections
//! (`PostView`, `CommentView`) add the derived resource link and edited
//! flag, which are computed, never stored.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Document identifier: 24 lowercase hex characters (12 random bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        rand::thread_rng().fill(&mut bytes[..]);
        DocumentId(hex::encode(bytes))
    }

    /// Parse a client-supplied identifier.
    ///
    /// Anything that is not exactly 24 hex digits is rejected here, before
    /// it can reach the store.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 24 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(DocumentId(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal authenticated-user projection carried in tokens and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: DocumentId,
    pub username: String,
}

/// User account document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: DocumentId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub username: String,
    /// Argon2 PHC hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Projection safe to expose through tokens and responses.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Blog post document.
///
/// `author` and `created_at` are immutable after creation; updates copy
/// them forward from the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: DocumentId,
    pub author: DocumentId,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Resource path, derived from the id.
    pub fn url(&self) -> String {
        format!("/post/{}", self.id)
    }

    /// True once the post has been changed after creation.
    pub fn edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Comment document. Always references an existing post at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: DocumentId,
    pub author: DocumentId,
    pub post: DocumentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Resource path relative to the parent post.
    pub fn url(&self) -> String {
        format!("/comment/{}", self.id)
    }

    pub fn edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Post as returned to clients, with the author joined in.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: DocumentId,
    pub author: Identity,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub edited: bool,
    pub link: String,
}

impl PostView {
    pub fn new(post: Post, author: Identity) -> Self {
        Self {
            link: post.url(),
            edited: post.edited(),
            id: post.id,
            author,
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment as returned to clients, with the author joined in.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: DocumentId,
    pub author: Identity,
    pub post: DocumentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub edited: bool,
    pub link: String,
}

impl CommentView {
    pub fn new(comment: Comment, author: Identity) -> Self {
        Self {
            link: format!("/post/{}{}", comment.post, comment.url()),
            edited: comment.edited(),
            id: comment.id,
            author,
            post: comment.post,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
