use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::ok;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the customer database answers, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = inventory_db::health_check(&state.pool).await.is_ok();

    ok(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: "inventory-guest",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount the health check route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
