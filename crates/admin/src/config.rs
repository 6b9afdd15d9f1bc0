/// Credentials for the admin account created at startup when no user with
/// that username exists yet.
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub username: String,
    pub password: String,
}

/// Admin service configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of an admin session in hours (default: `12`).
    pub session_ttl_hours: i64,
    /// Whether the session cookie carries the `Secure` attribute (default: `false`).
    pub cookie_secure: bool,
    /// Account seeded at startup, if both username and password are set.
    pub default_admin: Option<DefaultAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `5000`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:5001`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `ADMIN_SESSION_TTL_HOURS` | `12`                     |
    /// | `COOKIE_SECURE`           | `false`                  |
    /// | `ADMIN_DEFAULT_USERNAME`  | unset                    |
    /// | `ADMIN_DEFAULT_PASSWORD`  | unset                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
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

        let session_ttl_hours: i64 = std::env::var("ADMIN_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "12".into())
            .parse()
            .expect("ADMIN_SESSION_TTL_HOURS must be a valid i64");
        assert!(session_ttl_hours > 0, "ADMIN_SESSION_TTL_HOURS must be positive");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let default_admin = match (
            std::env::var("ADMIN_DEFAULT_USERNAME").ok(),
            std::env::var("ADMIN_DEFAULT_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(DefaultAdmin { username, password })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_hours,
            cookie_secure,
            default_admin,
        }
    }
}
