//! Configuration management for the blog service.
//!
//! Everything is loaded from environment variables with development
//! defaults; production refuses to start on placeholder secrets.

use serde::{Deserialize, Serialize};

use auth_core::token::DEFAULT_TOKEN_TTL_DAYS;

const DEV_TOKEN_SECRET: &str = "development-only-secret";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Token signing configuration
    pub auth: AuthConfig,
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-held secret used to sign and verify tokens
    pub token_secret: String,
    /// Token lifetime in days
    pub token_ttl_days: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BLOG_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            auth: {
                let token_secret = match std::env::var("AUTH_TOKEN_SECRET") {
                    Ok(value) if !value.trim().is_empty() => value,
                    _ if app_env.eq_ignore_ascii_case("production") => {
                        return Err(
                            "AUTH_TOKEN_SECRET must be set to a non-default value in production"
                                .to_string(),
                        )
                    }
                    _ => DEV_TOKEN_SECRET.to_string(),
                };

                AuthConfig {
                    token_secret,
                    token_ttl_days: std::env::var("TOKEN_TTL_DAYS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(DEFAULT_TOKEN_TTL_DAYS),
                }
            },
        })
    }
}
