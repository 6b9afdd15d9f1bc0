//! Admin order management.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use inventory_core::error::CoreError;
use inventory_core::status::OrderStatus;
use inventory_core::wire::{OrderDetail, StatusChange};
use inventory_db::models::order::Order;
use inventory_db::repositories::OrderRepo;
use serde::Serialize;

use crate::engine;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::orders::required_status;
use crate::middleware::session::RequireAdmin;
use crate::query::{parse_filter, StatusParams};
use crate::response::ok;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    /// Every status an order can be moved to.
    pub statuses: &'static [OrderStatus],
}

/// GET /admin/orders?status=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_filter::<OrderStatus>(params.status.as_deref())?;
    let orders = OrderRepo::list(&state.pool, status).await?;
    Ok(ok(OrderList {
        orders,
        statuses: OrderStatus::ALL,
    }))
}

/// GET /admin/orders/{order_id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_order_id(&state.pool, &order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", &order_id))?;
    Ok(ok(OrderDetail { order }))
}

/// POST /admin/orders/{order_id}/status
///
/// Body `{status}`. Completing an order marks its laptops sold.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    AppJson(input): AppJson<StatusChange>,
) -> AppResult<impl IntoResponse> {
    let status = required_status(&input)?;
    let order = engine::update_status(&state.pool, &order_id, status).await?;
    tracing::info!(admin = %admin.username, order_id = %order.order_id, status = %order.status, "Order status changed");
    Ok(ok(OrderDetail { order }))
}
