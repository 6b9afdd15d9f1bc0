//! Repository for the `customers` table.

use inventory_core::types::DbId;
use sqlx::PgPool;

use crate::models::customer::{CreateCustomer, Customer};

const COLUMNS: &str = "id, email, password_hash, name, is_active, created_at, updated_at";

/// Provides persistence for storefront customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer. A duplicate email violates `uq_customers_email`.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (email, password_hash, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by email, ignoring case.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Enable or disable login for a customer.
    pub async fn set_active(pool: &PgPool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE customers SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
