#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use inventory_core::password::hash_password;
use inventory_admin::config::ServerConfig;
use inventory_admin::router::build_app_router;
use inventory_admin::state::AppState;
use inventory_db::models::laptop::{CreateLaptop, Laptop};
use inventory_db::models::spare_part::{CreateSparePart, SparePart};
use inventory_db::models::user::CreateUser;
use inventory_db::repositories::{LaptopRepo, SparePartRepo, UserRepo};
use rust_decimal::Decimal;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5001".to_string()],
        request_timeout_secs: 30,
        session_ttl_hours: 12,
        cookie_secure: false,
        default_admin: None,
    }
}

/// Build the full application router, using the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Parse a JSON decimal (serialized as a string) for comparison.
pub fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, role: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
}

/// Log in through the API and return the `admin_session=...` cookie pair.
pub async fn login(app: Router, username: &str) -> String {
    let response = post_json(
        app,
        "/auth/login",
        serde_json::json!({ "username": username, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

/// Create an admin user and return a session cookie for it.
pub async fn admin_cookie(pool: &PgPool) -> String {
    create_user(pool, "admin", "admin").await;
    login(build_test_app(pool.clone()), "admin").await
}

pub async fn seed_laptop(pool: &PgPool, brand: &str, price: i64) -> Laptop {
    LaptopRepo::create(
        pool,
        &CreateLaptop {
            brand: brand.to_string(),
            model: "Test Model".to_string(),
            purchase_price: Some(Decimal::new(price / 2, 0)),
            selling_price: Decimal::new(price, 0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

pub async fn seed_part(pool: &PgPool, name: &str, part_type: &str, price: i64) -> SparePart {
    SparePartRepo::create(
        pool,
        &CreateSparePart {
            name: name.to_string(),
            part_type: part_type.to_string(),
            price: Decimal::new(price, 0),
            quantity: Some(5),
            description: None,
        },
    )
    .await
    .unwrap()
}
