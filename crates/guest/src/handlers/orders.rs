//! Order confirmation and tracking.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use inventory_core::error::CoreError;
use inventory_core::wire::{OrderDetail, OrderLookup};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::response::ok;
use crate::state::AppState;

/// GET /orders/{order_id}
pub async fn get(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = state
        .admin_api
        .get_order(&order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", &order_id))?;
    Ok(ok(OrderDetail { order }))
}

/// GET /orders/track?email=&order_id=
pub async fn track(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<OrderLookup>,
) -> AppResult<impl IntoResponse> {
    let email = params.email.as_deref().map(str::trim).unwrap_or_default();
    let order_id = params.order_id.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() || order_id.is_empty() {
        return Err(CoreError::Validation("Both email and order_id are required".into()).into());
    }

    let order = state
        .admin_api
        .lookup_order(email, order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", order_id))?;
    Ok(ok(OrderDetail { order }))
}
