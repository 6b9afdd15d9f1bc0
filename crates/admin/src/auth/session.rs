//! Opaque admin session tokens.
//!
//! The token handed to the browser is a random UUID; only its SHA-256 hash
//! is stored, so a database leak does not expose live sessions. The token
//! travels in the HttpOnly `admin_session` cookie.

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// Generate a session token. Returns `(plaintext, sha256_hex_hash)`.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `Set-Cookie` value installing a session token.
pub fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::hours(ttl_hours))
        .build()
        .to_string()
}

/// `Set-Cookie` value expiring the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
        .to_string()
}

/// Find a cookie by name across every `Cookie` header.
pub fn read_cookie(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| Cookie::split_parse(v.to_string()))
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
