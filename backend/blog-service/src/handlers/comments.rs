//! Comment endpoints. Every route here requires an authenticated
//! identity; what that identity may do is decided by the policy checks
//! against the parent post.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::db::Stores;
use crate::error::{AppError, Result};
use crate::middleware::RequestIdentity;
use crate::models::DocumentId;
use crate::services::CommentService;
use crate::validators;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Comment must not be empty and must not exceed 300 characters"
    ))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Comment must not be empty and must not exceed 300 characters"
    ))]
    pub text: String,
}

fn parse_ids(
    post_id: &str,
    comment_id: &str,
    missing_post: &str,
) -> Result<(DocumentId, DocumentId)> {
    let post_id =
        DocumentId::parse(post_id).ok_or_else(|| AppError::NotFound(missing_post.to_string()))?;
    let comment_id = DocumentId::parse(comment_id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok((post_id, comment_id))
}

/// Comment on a published post.
pub async fn create_comment(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let post_id = DocumentId::parse(&path).ok_or_else(|| {
        AppError::NotFound("Failed to create the comment because the post doesn't exist".to_string())
    })?;
    validators::validate_request(&*req, "Failed to create the comment")?;
    let author = identity.require()?;

    let service = CommentService::new(&stores);
    let (post, comment) = service.create(&post_id, author, &req.text).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully created the comment",
        "data": { "post": post, "comment": comment },
    })))
}

/// Read a single comment.
pub async fn get_comment(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let (post_id, comment_id) = parse_ids(
        &raw_post_id,
        &raw_comment_id,
        "Can't find the comment because the post doesn't exist",
    )?;
    let requester = identity.require()?;

    let service = CommentService::new(&stores);
    let (post, comment) = service.get(&post_id, &comment_id, requester).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Success",
        "data": { "post": post, "comment": comment },
    })))
}

/// List a post's comments.
pub async fn list_comments(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = DocumentId::parse(&path).ok_or_else(|| {
        AppError::NotFound("Can't find comments because the post doesn't exist".to_string())
    })?;
    let requester = identity.require()?;

    let service = CommentService::new(&stores);
    let (post, comments) = service.list(&post_id, requester).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Success",
        "data": { "post": post, "comments": comments },
    })))
}

/// Edit a comment. Comment-author-only, and only while the post is
/// published.
pub async fn update_comment(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let (post_id, comment_id) = parse_ids(
        &raw_post_id,
        &raw_comment_id,
        "Can't update the comment because the post doesn't exist",
    )?;
    validators::validate_request(&*req, "Failed to update the comment")?;
    let requester = identity.require()?;

    let service = CommentService::new(&stores);
    let (post, comment) = service
        .update(&post_id, &comment_id, requester, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully updated the comment",
        "data": { "post": post, "comment": comment },
    })))
}

/// Delete a comment. Comment-author-only, published post only.
pub async fn delete_comment(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let (post_id, comment_id) = parse_ids(
        &raw_post_id,
        &raw_comment_id,
        "Can't delete the comment because the post doesn't exist",
    )?;
    let requester = identity.require()?;

    let service = CommentService::new(&stores);
    let (post, comment) = service.delete(&post_id, &comment_id, requester).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted the comment",
        "data": { "post": post, "comment": comment },
    })))
}
