//! Repository for the `orders` table.

use inventory_core::order_id::format_order_id;
use inventory_core::status::OrderStatus;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::order::{CreateOrder, Order, OrderCounts};

const COLUMNS: &str = "id, order_id, status, items, total_amount, customer_name, \
                       customer_email, customer_phone, delivery_address, created_at, updated_at";

/// Provides persistence for orders. Orders are never deleted.
pub struct OrderRepo;

impl OrderRepo {
    /// Draw the next order number from `order_number_seq` and format it.
    pub async fn next_order_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<String, sqlx::Error> {
        let (seq,): (i64,) = sqlx::query_as("SELECT nextval('order_number_seq')")
            .fetch_one(&mut **tx)
            .await?;
        Ok(format_order_id(seq))
    }

    /// Insert an `unconfirmed` order inside the caller's transaction.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateOrder,
    ) -> Result<Order, sqlx::Error> {
        let order_id = Self::next_order_id(tx).await?;
        let query = format!(
            "INSERT INTO orders
                (order_id, status, items, total_amount, customer_name, customer_email,
                 customer_phone, delivery_address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&order_id)
            .bind(OrderStatus::Unconfirmed.as_str())
            .bind(Json(&input.items))
            .bind(input.total_amount)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(&input.customer_phone)
            .bind(&input.delivery_address)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find an order by its human-readable id.
    pub async fn find_by_order_id(
        pool: &PgPool,
        order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(pool)
            .await
    }

    /// Load an order and lock its row until the transaction ends.
    pub async fn find_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find an order by id only if it belongs to `email` (case-insensitive).
    pub async fn lookup(
        pool: &PgPool,
        email: &str,
        order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE order_id = $1 AND LOWER(customer_email) = LOWER($2)"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// List orders newest first, optionally restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recent orders.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Write a new status inside the caller's transaction.
    ///
    /// Returns `None` if no order has `order_id`.
    pub async fn set_status(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2
             WHERE order_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn counts(pool: &PgPool) -> Result<OrderCounts, sqlx::Error> {
        sqlx::query_as::<_, OrderCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'unconfirmed') AS unconfirmed
             FROM orders",
        )
        .fetch_one(pool)
        .await
    }
}
