//! The session cart.
//!
//! Every handler takes a [`CartSession`] and sets the `cart_session`
//! cookie when the visitor did not have one yet.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::response::{AppendHeaders, IntoResponse};
use inventory_core::cart::Cart;
use inventory_core::catalog::{CatalogSnapshot, PricedLine, UnavailableItem, UnavailableReason};
use inventory_core::error::CoreError;
use inventory_core::status::LaptopStatus;
use inventory_core::types::{DbId, Money};
use serde::{Deserialize, Serialize};

use crate::admin_api::AdminApi;
use crate::cart_store::CartSession;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::ok;
use crate::state::AppState;

/// Request body for `POST /cart/add`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub laptop_id: Option<DbId>,
    #[serde(default)]
    pub spare_part_ids: Vec<DbId>,
    pub quantity: Option<u32>,
}

/// Request body for `POST /cart/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub laptop_id: Option<DbId>,
    #[serde(default)]
    pub spare_part_ids: Vec<DbId>,
}

/// Priced cart. `warnings` lists selections left out of `total`.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<PricedLine>,
    pub warnings: Vec<UnavailableItem>,
    pub total: Money,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CartCount {
    pub cart_count: usize,
}

/// GET /cart
pub async fn get(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<impl IntoResponse> {
    let cart = state.carts.get(&session.id).await;
    let snapshot = resolve(state.admin_api.as_ref(), &cart).await?;
    let projection = cart.project(&snapshot);

    for warning in &projection.warnings {
        tracing::warn!(cart = %session.id, laptop_id = warning.laptop_id, reason = %warning, "Cart item unavailable");
    }

    Ok((
        AppendHeaders(session.set_cookie()),
        ok(CartView {
            count: cart.len(),
            items: projection.items,
            warnings: projection.warnings,
            total: projection.total,
        }),
    ))
}

/// POST /cart/add
///
/// The laptop must exist and be available. Re-adding a laptop replaces its
/// spare part selection.
pub async fn add(
    State(state): State<AppState>,
    session: CartSession,
    AppJson(input): AppJson<AddToCartRequest>,
) -> AppResult<impl IntoResponse> {
    let laptop_id = input
        .laptop_id
        .ok_or_else(|| CoreError::Validation("Missing required field: laptop_id".into()))?;

    let laptop = state
        .admin_api
        .get_laptop(laptop_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Laptop", laptop_id))?;
    if laptop.status != LaptopStatus::Available {
        return Err(CoreError::Unavailable(vec![UnavailableItem {
            laptop_id,
            reason: UnavailableReason::LaptopNotAvailable {
                status: laptop.status,
            },
        }])
        .into());
    }

    let cart_count = state
        .carts
        .update(&session.id, |cart| {
            cart.add(laptop_id, input.spare_part_ids, input.quantity)
        })
        .await?;

    tracing::debug!(cart = %session.id, laptop_id, cart_count, "Cart item added");
    Ok((AppendHeaders(session.set_cookie()), ok(CartCount { cart_count })))
}

/// POST /cart/update
pub async fn update(
    State(state): State<AppState>,
    session: CartSession,
    AppJson(input): AppJson<UpdateCartRequest>,
) -> AppResult<impl IntoResponse> {
    let laptop_id = input
        .laptop_id
        .ok_or_else(|| CoreError::Validation("Missing required field: laptop_id".into()))?;

    let cart_count = state
        .carts
        .update(&session.id, |cart| {
            cart.update(laptop_id, input.spare_part_ids).map(|()| cart.len())
        })
        .await?;
    Ok((AppendHeaders(session.set_cookie()), ok(CartCount { cart_count })))
}

/// POST /cart/remove/{laptop_id}
///
/// Removing a laptop that is not in the cart is a no-op.
pub async fn remove(
    State(state): State<AppState>,
    session: CartSession,
    Path(laptop_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let cart_count = state
        .carts
        .update(&session.id, |cart| {
            cart.remove(laptop_id);
            cart.len()
        })
        .await;
    Ok((AppendHeaders(session.set_cookie()), ok(CartCount { cart_count })))
}

/// POST /cart/clear
pub async fn clear(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<impl IntoResponse> {
    state.carts.clear(&session.id).await;
    Ok((
        AppendHeaders(session.set_cookie()),
        ok(CartCount { cart_count: 0 }),
    ))
}

/// Fetch the current catalog records a cart refers to.
///
/// Laptops that no longer exist are simply absent from the snapshot; the
/// projection reports them.
pub(crate) async fn resolve(api: &dyn AdminApi, cart: &Cart) -> AppResult<CatalogSnapshot> {
    let mut laptops = Vec::with_capacity(cart.len());
    for id in cart.laptop_ids() {
        if let Some(laptop) = api.get_laptop(id).await? {
            laptops.push(laptop);
        }
    }

    let wanted: HashSet<DbId> = cart.spare_part_ids().into_iter().collect();
    let parts = if wanted.is_empty() {
        Vec::new()
    } else {
        api.list_spare_parts()
            .await?
            .into_iter()
            .filter(|p| wanted.contains(&p.id))
            .collect()
    };

    Ok(CatalogSnapshot::new(laptops, parts))
}
