//! Storefront cookies.
//!
//! `auth_token` carries the customer JWT; `cart_session` is the random key
//! of the visitor's cart. Both are HttpOnly.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

/// Name of the cookie carrying the customer token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Name of the cookie keying the session cart.
pub const CART_COOKIE: &str = "cart_session";

/// Cart cookies outlive a browser restart by a week.
const CART_COOKIE_DAYS: i64 = 7;

/// Find a cookie by name across every `Cookie` header.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| Cookie::split_parse(v.to_string()))
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// `Set-Cookie` value installing a customer token.
pub fn auth_cookie(token: &str, expiry_hours: i64, secure: bool) -> String {
    build(AUTH_COOKIE, token.to_string(), Duration::hours(expiry_hours), secure)
}

/// `Set-Cookie` value expiring the customer token.
pub fn clear_auth_cookie(secure: bool) -> String {
    build(AUTH_COOKIE, String::new(), Duration::ZERO, secure)
}

/// `Set-Cookie` value installing a cart session id.
pub fn cart_cookie(session_id: &str, secure: bool) -> String {
    build(
        CART_COOKIE,
        session_id.to_string(),
        Duration::days(CART_COOKIE_DAYS),
        secure,
    )
}

fn build(name: &'static str, value: String, max_age: Duration, secure: bool) -> String {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
        .to_string()
}
