//! Business logic layer.
//!
//! Services orchestrate the fixed pipeline behind each handler: load the
//! resource(s) through the store traits, consult the permission checks,
//! then perform the mutation or assemble the read projection. Author
//! references are joined explicitly (fetch the resource, then fetch the
//! author) rather than relying on any implicit population.

pub mod comments;
pub mod posts;
pub mod users;

use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{DocumentId, Identity};

pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;

/// Resolve a stored author reference to its identity projection.
///
/// A dangling reference means the store lost a user out from under us;
/// that is an internal fault, not a client-visible 404.
pub(crate) async fn lookup_identity(
    users: &Arc<dyn UserStore>,
    id: &DocumentId,
) -> Result<Identity> {
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("author {id} is missing from the store")))?;
    Ok(user.identity())
}
