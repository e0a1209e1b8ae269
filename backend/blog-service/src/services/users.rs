//! Account management: sign-up and credential verification.

use std::sync::Arc;

use auth_core::{hash_password, verify_password};

use crate::db::{Stores, UserStore};
use crate::error::{AppError, Result};
use crate::models::{DocumentId, Identity, User};
use crate::validators;

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            users: stores.users.clone(),
        }
    }

    /// Create an account.
    ///
    /// A taken username surfaces as a field-level validation failure,
    /// indistinguishable from the declarative rules on the same field.
    pub async fn sign_up(
        &self,
        first_name: &str,
        last_name: &str,
        date_of_birth: Option<chrono::NaiveDate>,
        username: &str,
        password: &str,
    ) -> Result<Identity> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::field_invalid(
                "Failed to create the user",
                "username",
                "Username is already taken",
            ));
        }

        let password_hash = hash_password(password)?;
        let user = User {
            id: DocumentId::generate(),
            first_name: validators::sanitize(first_name),
            last_name: validators::sanitize(last_name),
            date_of_birth,
            username: username.to_string(),
            password_hash,
        };

        let user = self.users.insert(user).await?;
        tracing::info!(username = %user.username, "user created");
        Ok(user.identity())
    }

    /// Credential verifier: exact username lookup plus one-way hash
    /// comparison. Read-only; returns the identity projection on success.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Identity> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Incorrect username".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        Ok(user.identity())
    }
}
