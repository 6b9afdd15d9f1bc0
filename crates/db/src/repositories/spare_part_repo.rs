//! Repository for the `spare_parts` table.

use inventory_core::types::DbId;
use sqlx::PgPool;

use crate::models::spare_part::{CreateSparePart, SparePart, UpdateSparePart};

const COLUMNS: &str = "id, name, type, price, quantity, description, created_at, updated_at";

/// Provides CRUD operations for spare parts.
pub struct SparePartRepo;

impl SparePartRepo {
    /// Insert a new spare part, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSparePart) -> Result<SparePart, sqlx::Error> {
        let query = format!(
            "INSERT INTO spare_parts (name, type, price, quantity, description)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SparePart>(&query)
            .bind(&input.name)
            .bind(&input.part_type)
            .bind(input.price)
            .bind(input.quantity)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SparePart>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spare_parts WHERE id = $1");
        sqlx::query_as::<_, SparePart>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every part in `ids` inside a transaction.
    pub async fn find_by_ids(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        ids: &[DbId],
    ) -> Result<Vec<SparePart>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spare_parts WHERE id = ANY($1)");
        sqlx::query_as::<_, SparePart>(&query)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// List parts ordered by name, optionally restricted to one `type`
    /// (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        part_type: Option<&str>,
    ) -> Result<Vec<SparePart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM spare_parts
             WHERE ($1::TEXT IS NULL OR LOWER(type) = LOWER($1))
             ORDER BY name, id"
        );
        sqlx::query_as::<_, SparePart>(&query)
            .bind(part_type.map(str::trim).filter(|t| !t.is_empty()))
            .fetch_all(pool)
            .await
    }

    /// Update a spare part. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSparePart,
    ) -> Result<Option<SparePart>, sqlx::Error> {
        let query = format!(
            "UPDATE spare_parts SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity),
                description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SparePart>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.part_type)
            .bind(input.price)
            .bind(input.quantity)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM spare_parts")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
