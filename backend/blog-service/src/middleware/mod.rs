//! HTTP middleware utilities: identity extraction from bearer tokens.
//!
//! `RequestIdentity` runs the token verification once per request and
//! hands the outcome to the handler. Extraction itself never rejects a
//! request: each handler decides at its authentication step whether a
//! missing or bad token is fatal (`require`) or leaves the request
//! anonymous (`identity`); published posts stay readable without any
//! credential at all.

pub mod permissions;

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use auth_core::{TokenError, TokenService};

use crate::error::AppError;
use crate::models::{DocumentId, Identity};

/// Identity derived from the request's `Authorization` header, if any.
#[derive(Debug, Clone)]
pub struct RequestIdentity(Result<Identity, TokenError>);

impl RequestIdentity {
    /// The identity, when a valid token was presented.
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref().ok()
    }

    /// Require an authenticated identity, rejecting the request with 401
    /// otherwise.
    pub fn require(&self) -> Result<&Identity, AppError> {
        self.0.as_ref().map_err(|e| AppError::from(e.clone()))
    }
}

fn extract_identity(req: &HttpRequest) -> Result<RequestIdentity, AppError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Internal("token service not configured".to_string()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let outcome = tokens.verify_header(header).and_then(|claims| {
        // A token whose subject is not a document id cannot name a user.
        let id = DocumentId::parse(&claims.sub).ok_or(TokenError::Malformed)?;
        Ok(Identity {
            id,
            username: claims.username,
        })
    });

    Ok(RequestIdentity(outcome))
}

impl FromRequest for RequestIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_identity(req))
    }
}
