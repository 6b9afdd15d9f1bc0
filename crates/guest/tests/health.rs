mod common;

use axum::http::StatusCode;
use common::{body_json, get, standard_catalog};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = common::build_app(pool, standard_catalog());

    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "inventory-guest");
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = common::build_app_without_db(standard_catalog());
    let response = get(&app, "/definitely-not-here", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
