//! Admin-driven order status changes and the sold cascade.

use std::collections::HashSet;

use inventory_core::error::CoreError;
use inventory_core::status::OrderStatus;
use inventory_core::types::DbId;
use inventory_db::models::order::Order;
use inventory_db::repositories::{LaptopRepo, OrderRepo};
use inventory_db::DbPool;

use crate::error::AppResult;

/// Move an order to `raw_status`.
///
/// Entering `completed` marks every laptop in the order's snapshot sold in
/// the same transaction. If any of those laptops no longer exists the
/// transaction is rolled back and `NotFound` is returned; if any was already
/// sold by another order or by hand, `Conflict`.
pub async fn update_status(pool: &DbPool, order_id: &str, raw_status: &str) -> AppResult<Order> {
    let next: OrderStatus = raw_status.parse()?;

    let mut tx = pool.begin().await?;

    let current = OrderRepo::find_for_update(&mut tx, order_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", order_id))?;

    if !current.status.can_transition_to(next) {
        return Err(CoreError::Validation(format!(
            "Cannot move order {order_id} from {} to {next}",
            current.status
        ))
        .into());
    }

    let order = OrderRepo::set_status(&mut tx, order_id, next)
        .await?
        .ok_or_else(|| CoreError::not_found("Order", order_id))?;

    if next.marks_laptops_sold() {
        let laptop_ids = order.laptop_ids();
        let existing: HashSet<DbId> = LaptopRepo::find_by_ids_for_update(&mut tx, &laptop_ids)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        let missing = join_ids(laptop_ids.iter().filter(|id| !existing.contains(id)));
        if !missing.is_empty() {
            tracing::warn!(order_id, missing = %missing, "Sold cascade aborted");
            return Err(CoreError::not_found("Laptop", missing).into());
        }

        let claimed: HashSet<DbId> = LaptopRepo::mark_sold(&mut tx, &laptop_ids, order_id)
            .await?
            .into_iter()
            .collect();
        let taken = join_ids(laptop_ids.iter().filter(|id| !claimed.contains(id)));
        if !taken.is_empty() {
            tracing::warn!(order_id, laptops = %taken, "Sold cascade aborted: already sold");
            return Err(CoreError::Conflict(format!(
                "Laptop(s) {taken} already sold; order {order_id} cannot be completed"
            ))
            .into());
        }
        tracing::info!(order_id, laptops = laptop_ids.len(), "Laptops marked sold");
    }

    tx.commit().await?;

    tracing::info!(order_id, from = %current.status, to = %next, "Order status updated");
    Ok(order)
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a DbId>) -> String {
    ids.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
