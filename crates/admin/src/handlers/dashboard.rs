//! Admin dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use inventory_db::models::laptop::{LaptopCounts, LaptopSummary};
use inventory_db::models::order::{Order, OrderCounts};
use inventory_db::repositories::{LaptopRepo, OrderRepo, SparePartRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::session::RequireAdmin;
use crate::response::ok;
use crate::state::AppState;

/// How many recent laptops and orders the dashboard shows.
const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub laptops: LaptopCounts,
    pub spare_parts: i64,
    pub orders: OrderCounts,
    pub recent_laptops: Vec<LaptopSummary>,
    pub recent_orders: Vec<Order>,
}

/// GET /admin/dashboard
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let dashboard = Dashboard {
        laptops: LaptopRepo::counts(&state.pool).await?,
        spare_parts: SparePartRepo::count(&state.pool).await?,
        orders: OrderRepo::counts(&state.pool).await?,
        recent_laptops: LaptopRepo::recent(&state.pool, RECENT_LIMIT).await?,
        recent_orders: OrderRepo::recent(&state.pool, RECENT_LIMIT).await?,
    };
    Ok(ok(dashboard))
}
