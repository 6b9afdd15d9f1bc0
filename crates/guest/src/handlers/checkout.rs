//! Checkout: hand the cart to the admin service and clear it on success.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use inventory_core::checkout::{CustomerInfo, PlaceOrderRequest};
use inventory_core::error::CoreError;

use crate::cart_store::CartSession;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::ok;
use crate::state::AppState;

/// POST /checkout
///
/// Body `{customer_name, email, phone, address}`. The admin service
/// re-prices the cart and may leave unavailable laptops out of the order;
/// those come back in `unavailable`. On any failure the cart is kept.
pub async fn checkout(
    State(state): State<AppState>,
    session: CartSession,
    AppJson(info): AppJson<CustomerInfo>,
) -> AppResult<impl IntoResponse> {
    let cart = state.carts.get(&session.id).await;
    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }
    info.clone().into_customer()?;

    let request = PlaceOrderRequest {
        customer: info,
        items: Some(cart.items().to_vec()),
    };
    let placed = state
        .admin_api
        .place_order(&request)
        .await
        .inspect_err(|e| tracing::warn!(cart = %session.id, error = %e, "Checkout failed; cart kept"))?;

    state.carts.clear(&session.id).await;

    for item in &placed.unavailable {
        tracing::warn!(order_id = %placed.order_id, laptop_id = item.laptop_id, reason = %item, "Left out of order");
    }
    tracing::info!(order_id = %placed.order_id, total_amount = %placed.total_amount, "Checkout complete");

    Ok((
        StatusCode::CREATED,
        AppendHeaders(session.set_cookie()),
        ok(placed),
    ))
}
