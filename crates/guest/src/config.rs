use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Guest storefront configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// `JWT_SECRET`. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct GuestConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the admin service's public API (default: `http://localhost:5000/api`).
    pub admin_api_url: String,
    /// Timeout for calls to the admin API in seconds (default: `10`).
    pub admin_api_timeout_secs: u64,
    /// Whether cookies carry the `Secure` attribute (default: `false`).
    pub cookie_secure: bool,
    /// Hours a cart survives without changes (default: `168`).
    pub cart_ttl_hours: u64,
    /// Customer token configuration.
    pub jwt: JwtConfig,
}

impl GuestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `HOST`                   | `0.0.0.0`                   |
    /// | `PORT`                   | `5001`                      |
    /// | `CORS_ORIGINS`           | `http://localhost:5001`     |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                        |
    /// | `ADMIN_API_URL`          | `http://localhost:5000/api` |
    /// | `ADMIN_API_TIMEOUT_SECS` | `10`                        |
    /// | `COOKIE_SECURE`          | `false`                     |
    /// | `CART_TTL_HOURS`         | `168`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_api_url = std::env::var("ADMIN_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".into())
            .trim_end_matches('/')
            .to_string();

        let admin_api_timeout_secs: u64 = std::env::var("ADMIN_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("ADMIN_API_TIMEOUT_SECS must be a valid u64");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let cart_ttl_hours: u64 = std::env::var("CART_TTL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .expect("CART_TTL_HOURS must be a valid u64");
        assert!(cart_ttl_hours > 0, "CART_TTL_HOURS must be positive");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_api_url,
            admin_api_timeout_secs,
            cookie_secure,
            cart_ttl_hours,
            jwt,
        }
    }

    /// [`Self::cart_ttl_hours`] as a [`Duration`].
    pub fn cart_ttl(&self) -> Duration {
        Duration::from_secs(self.cart_ttl_hours * 3600)
    }
}
