//! Authorization rules for posts and comments.
//!
//! Ownership always grants full access to a resource; publication state
//! gates what everyone else can see or do. Every check is a pure function
//! over the resource, its publication state and the (possibly absent)
//! requesting identity; no I/O happens here. Denials for unpublished
//! resources carry messages that say so, rather than a generic forbidden.

use crate::error::AppError;
use crate::models::{Comment, DocumentId, Identity, Post};

/// Result type for permission checks.
pub type PermissionResult = Result<(), AppError>;

fn is_owner(owner: &DocumentId, requester: Option<&Identity>) -> bool {
    requester.is_some_and(|identity| identity.id == *owner)
}

fn unauthenticated() -> AppError {
    AppError::Unauthorized("Authentication required".to_string())
}

/// Whether a post is visible to the requester at all.
///
/// The author always sees their own post; everyone else (including
/// anonymous readers) only once it is published.
pub fn post_visible(post: &Post, requester: Option<&Identity>) -> bool {
    post.published || is_owner(&post.author, requester)
}

/// Read access to a post.
pub fn check_post_read(post: &Post, requester: Option<&Identity>) -> PermissionResult {
    if post_visible(post, requester) {
        return Ok(());
    }
    match requester {
        Some(_) => Err(AppError::Forbidden(
            "Can't view an unpublished post unless you are the author".to_string(),
        )),
        None => Err(unauthenticated()),
    }
}

/// Post mutations (update, delete) are owner-only.
pub fn check_post_mutation(post: &Post, requester: Option<&Identity>) -> PermissionResult {
    match requester {
        None => Err(unauthenticated()),
        Some(identity) if identity.id == post.author => Ok(()),
        Some(_) => Err(AppError::Forbidden(
            "Only the author can modify this post".to_string(),
        )),
    }
}

/// Commenting needs an authenticated identity and a published post; the
/// commenter does not have to own anything.
pub fn check_comment_create(post: &Post, requester: Option<&Identity>) -> PermissionResult {
    if requester.is_none() {
        return Err(unauthenticated());
    }
    if !post.published {
        return Err(AppError::Forbidden(
            "Can't write a comment on an unpublished post".to_string(),
        ));
    }
    Ok(())
}

/// Reading comments follows the parent post: the post author always,
/// any authenticated identity once the post is published.
pub fn check_comment_read(post: &Post, requester: Option<&Identity>) -> PermissionResult {
    match requester {
        None => Err(unauthenticated()),
        Some(identity) if post.published || identity.id == post.author => Ok(()),
        Some(_) => Err(AppError::Forbidden(
            "Can't view comments on an unpublished post unless you are the author".to_string(),
        )),
    }
}

/// Comment mutations (update, delete) require comment authorship and a
/// published parent post. An unpublished post freezes its whole thread,
/// even for the comment's own author.
pub fn check_comment_mutation(
    post: &Post,
    comment: &Comment,
    requester: Option<&Identity>,
) -> PermissionResult {
    let identity = match requester {
        Some(identity) => identity,
        None => return Err(unauthenticated()),
    };
    if !post.published {
        return Err(AppError::Forbidden(
            "Can't modify a comment on an unpublished post".to_string(),
        ));
    }
    if identity.id != comment.author {
        return Err(AppError::Forbidden(
            "Only the comment author can modify this comment".to_string(),
        ));
    }
    Ok(())
}
