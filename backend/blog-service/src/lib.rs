//! Blog service library.
//!
//! A blogging REST API: users register and log in, author posts and
//! comments. Visibility follows publication state and authorship: a post
//! is world-readable once published, owner-only before that, and every
//! mutation requires ownership.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers and route wiring
//! - `models`: document entities, request DTOs and response projections
//! - `services`: business logic layer
//! - `db`: store traits for the persistence collaborator + in-memory backend
//! - `middleware`: bearer-token identity extraction and access policy
//! - `validators`: field validation helpers and text sanitization
//! - `error`: error types and HTTP mapping
//! - `config`: configuration management

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};
