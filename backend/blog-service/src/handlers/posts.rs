//! Post endpoints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::db::Stores;
use crate::error::{AppError, Result};
use crate::middleware::RequestIdentity;
use crate::models::DocumentId;
use crate::services::PostService;
use crate::validators;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Title must not be empty and must not exceed 300 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 100,
        message = "Blog content must contain a minimum of 100 characters"
    ))]
    pub content: String,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Title must not be empty and must not exceed 300 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 100,
        message = "Blog content must contain a minimum of 100 characters"
    ))]
    pub content: String,
    pub published: Option<bool>,
}

fn parse_post_id(raw: &str) -> Result<DocumentId> {
    DocumentId::parse(raw).ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

/// Create a post. Authenticated; `published` defaults to false.
pub async fn create_post(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    validators::validate_request(&*req, "Failed to create the post")?;
    let author = identity.require()?;

    let service = PostService::new(&stores);
    let post = service
        .create(author, &req.title, &req.content, req.published)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully created the post",
        "data": { "post": post },
    })))
}

/// Read a post. Anonymous for published posts, owner-only for drafts.
pub async fn get_post(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let service = PostService::new(&stores);
    let post = service.get(&post_id, identity.identity()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Success",
        "data": { "post": post },
    })))
}

/// List visible posts: everything published plus the caller's own drafts.
pub async fn list_posts(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
) -> Result<HttpResponse> {
    let service = PostService::new(&stores);
    let posts = service.list(identity.identity()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Success",
        "data": { "posts": posts },
    })))
}

/// Replace a post's title/content/publication state. Owner-only.
pub async fn update_post(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<String>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    validators::validate_request(&*req, "Failed to update the post")?;
    let requester = identity.require()?;

    let service = PostService::new(&stores);
    let post = service
        .update(&post_id, requester, &req.title, &req.content, req.published)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully updated the post",
        "data": { "post": post },
    })))
}

/// Delete a post and its comment thread. Owner-only.
pub async fn delete_post(
    stores: web::Data<Stores>,
    identity: RequestIdentity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let requester = identity.require()?;

    let service = PostService::new(&stores);
    service.delete(&post_id, requester).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted the post",
    })))
}
