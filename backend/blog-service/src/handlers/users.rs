//! Account endpoints: sign-up and login.

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use auth_core::TokenService;

use crate::db::Stores;
use crate::error::Result;
use crate::services::UserService;
use crate::validators;

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(
        length(
            min = 1,
            max = 100,
            message = "First name must be between 1 and 100 characters"
        ),
        custom(
            function = crate::validators::validate_alphabetic,
            message = "First name must only contain alphabetical letters"
        )
    )]
    pub first_name: String,
    #[validate(
        length(
            min = 1,
            max = 100,
            message = "Last name must be between 1 and 100 characters"
        ),
        custom(
            function = crate::validators::validate_alphabetic,
            message = "Last name must only contain alphabetical letters"
        )
    )]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(
        length(
            min = 1,
            max = 60,
            message = "Username must be between 1 and 60 characters"
        ),
        custom(
            function = crate::validators::validate_alphanumeric,
            message = "Username must only contain letters and numbers"
        )
    )]
    pub username: String,
    #[validate(length(
        min = 1,
        max = 60,
        message = "Password must be between 1 and 60 characters"
    ))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Create a user account.
pub async fn sign_up(
    stores: web::Data<Stores>,
    req: web::Json<SignUpRequest>,
) -> Result<HttpResponse> {
    validators::validate_request(&*req, "Failed to create the user")?;

    let service = UserService::new(&stores);
    service
        .sign_up(
            &req.first_name,
            &req.last_name,
            req.date_of_birth,
            &req.username,
            &req.password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully created the user",
    })))
}

/// Verify credentials and issue a token.
pub async fn login(
    stores: web::Data<Stores>,
    tokens: web::Data<TokenService>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    validators::validate_request(&*req, "Failed to log in")?;

    let service = UserService::new(&stores);
    let identity = service
        .verify_credentials(&req.username, &req.password)
        .await?;
    let token = tokens.issue(identity.id.as_str(), &identity.username)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully logged in",
        "token": token,
    })))
}
