//! Public order API: checkout, lookup and the session-guarded status patch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use inventory_core::checkout::{PlaceOrderRequest, PlacedOrder};
use inventory_core::error::CoreError;
use inventory_core::wire::{OrderDetail, OrderLookup, StatusChange};
use inventory_db::repositories::OrderRepo;

use crate::engine;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::session::RequireAdmin;
use crate::response::ok;
use crate::state::AppState;

/// POST /api/orders
///
/// Returns 201 with `{order_id, total_amount, unavailable}`.
pub async fn place_order(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlaceOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let placed = engine::place_order(&state.pool, input).await?;
    Ok((
        StatusCode::CREATED,
        ok(PlacedOrder {
            order_id: placed.order.order_id,
            total_amount: placed.order.total_amount,
            unavailable: placed.unavailable,
        }),
    ))
}

/// GET /api/orders/lookup?email=&order_id=
///
/// Finds an order only when the email matches the one it was placed with.
pub async fn lookup(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<OrderLookup>,
) -> AppResult<impl IntoResponse> {
    let email = params.email.as_deref().map(str::trim).unwrap_or_default();
    let order_id = params.order_id.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() || order_id.is_empty() {
        return Err(CoreError::Validation("Both email and order_id are required".into()).into());
    }

    let order = OrderRepo::lookup(&state.pool, email, order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", order_id))?;
    Ok(ok(OrderDetail { order }))
}

/// GET /api/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_order_id(&state.pool, &order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", &order_id))?;
    Ok(ok(OrderDetail { order }))
}

/// PATCH /api/orders/{order_id}
///
/// Body `{status}`. Requires an admin session.
pub async fn patch_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    AppJson(input): AppJson<StatusChange>,
) -> AppResult<impl IntoResponse> {
    let status = required_status(&input)?;
    let order = engine::update_status(&state.pool, &order_id, status).await?;
    tracing::debug!(admin = %admin.username, order_id = %order.order_id, "Status patched via API");
    Ok(ok(OrderDetail { order }))
}

/// The `status` field of a status change, or a validation error.
pub(crate) fn required_status(input: &StatusChange) -> Result<&str, CoreError> {
    input
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("Missing required field: status".into()))
}
