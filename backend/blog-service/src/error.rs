//! Error types for the blog service.
//!
//! Every domain condition is converted into one of these variants at the
//! point it is detected; the `ResponseError` impl maps them onto the HTTP
//! surface. The mapping is uniform: 401 means the request carried no
//! usable credential, 403 means the credential was fine but the identity
//! lacks permission. Unexpected collaborator failures become 500s without
//! leaking internals to clients.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

use auth_core::{PasswordHashError, TokenError, TokenIssueError};

use crate::db::StoreError;

/// Result type for blog-service operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation failure as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed field validation (422). Carries the ordered
    /// list of field/message pairs; duplicate usernames surface here too.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// Resource not found, or a path id that cannot name a resource (404).
    #[error("{0}")]
    NotFound(String),

    /// No valid credential was presented (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Valid credential, insufficient permission (403).
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected failure in a collaborator (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure with a single field error.
    pub fn field_invalid(
        message: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: vec![FieldError {
                field: field.into(),
                message: detail.into(),
            }],
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Validation { message, errors } => {
                HttpResponse::build(status).json(serde_json::json!({
                    "message": message,
                    "errors": errors,
                }))
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                HttpResponse::build(status).json(serde_json::json!({
                    "message": "Internal server error",
                }))
            }
            other => HttpResponse::build(status).json(serde_json::json!({
                "message": other.to_string(),
            })),
        }
    }
}

// Conversions from collaborator error types

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PasswordHashError> for AppError {
    fn from(err: PasswordHashError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenIssueError> for AppError {
    fn from(err: TokenIssueError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AppError::Unauthorized("No token supplied".to_string()),
            TokenError::Malformed => AppError::Unauthorized("Invalid token".to_string()),
            TokenError::Expired => AppError::Unauthorized("Token has expired".to_string()),
        }
    }
}
