//! Shared authentication primitives for Quill services.
//!
//! Two concerns live here:
//!
//! - `password`: one-way password hashing and verification (Argon2id)
//! - `token`: signed, expiring bearer tokens binding a user identity
//!
//! Nothing in this crate touches storage or HTTP; services wire these
//! primitives into their own request handling.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordHashError};
pub use token::{Claims, TokenError, TokenIssueError, TokenService};
