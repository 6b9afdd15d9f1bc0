//! Checkout: cart lines + customer details into one persisted order.

use inventory_core::catalog::{CatalogSnapshot, UnavailableItem};
use inventory_core::checkout::{plan_checkout, validate_input, PlaceOrderRequest};
use inventory_core::types::DbId;
use inventory_db::models::laptop::Laptop;
use inventory_db::models::order::{CreateOrder, Order};
use inventory_db::models::spare_part::SparePart;
use inventory_db::repositories::{LaptopRepo, OrderRepo, SparePartRepo};
use inventory_db::DbPool;

use crate::error::AppResult;

/// The written order plus the selections that were left out of it.
#[derive(Debug)]
pub struct PlacedOrderResult {
    pub order: Order,
    pub unavailable: Vec<UnavailableItem>,
}

/// Validate, re-price and persist an order.
///
/// Laptops and spare parts are re-read inside the transaction; prices sent
/// by the client are never trusted. Lines that can no longer be bought are
/// returned in [`PlacedOrderResult::unavailable`]. When none can be bought
/// nothing is written.
pub async fn place_order(pool: &DbPool, request: PlaceOrderRequest) -> AppResult<PlacedOrderResult> {
    validate_input(&request)?;
    let customer = request.customer.into_customer()?;
    let lines = request.items.unwrap_or_default();

    let laptop_ids: Vec<DbId> = lines.iter().map(|l| l.laptop_id).collect();
    let part_ids: Vec<DbId> = lines
        .iter()
        .flat_map(|l| l.spare_part_ids.iter().copied())
        .collect();

    let mut tx = pool.begin().await?;

    let laptops = LaptopRepo::find_by_ids_for_update(&mut tx, &laptop_ids).await?;
    let parts = SparePartRepo::find_by_ids(&mut tx, &part_ids).await?;
    let snapshot = CatalogSnapshot::new(
        laptops.iter().map(Laptop::to_catalog),
        parts.iter().map(SparePart::to_catalog),
    );

    let plan = plan_checkout(&lines, &snapshot)?;

    let order = OrderRepo::create(
        &mut tx,
        &CreateOrder {
            customer_name: customer.name,
            customer_email: customer.email,
            customer_phone: customer.phone,
            delivery_address: customer.address,
            items: plan.items,
            total_amount: plan.total_amount,
        },
    )
    .await?;

    tx.commit().await?;

    for item in &plan.unavailable {
        tracing::warn!(order_id = %order.order_id, laptop_id = item.laptop_id, reason = %item, "Checkout line rejected");
    }
    tracing::info!(
        order_id = %order.order_id,
        total_amount = %order.total_amount,
        items = order.items.len(),
        "Order placed"
    );

    Ok(PlacedOrderResult {
        order,
        unavailable: plan.unavailable,
    })
}
