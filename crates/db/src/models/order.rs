//! Order entity model and DTOs.

use inventory_core::checkout::OrderItemSnapshot;
use inventory_core::status::OrderStatus;
use inventory_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full order row from the `orders` table.
///
/// `items` is the snapshot written at checkout and never modified.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: DbId,
    pub order_id: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub items: Json<Vec<OrderItemSnapshot>>,
    pub total_amount: Money,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    pub fn laptop_ids(&self) -> Vec<DbId> {
        self.items.iter().map(|i| i.laptop_id).collect()
    }
}

/// DTO for inserting an order. The order id and status are assigned by
/// the repository.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: Money,
}

/// Order counts for the admin dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct OrderCounts {
    pub total: i64,
    pub unconfirmed: i64,
}
