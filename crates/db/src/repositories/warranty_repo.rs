//! Repository for the `warranties` table.

use chrono::Utc;
use inventory_core::types::DbId;
use sqlx::PgPool;

use crate::models::warranty::{CreateWarranty, UpdateWarranty, Warranty};

const COLUMNS: &str =
    "id, laptop_id, provider, start_date, end_date, notes, created_at, updated_at";

/// Provides CRUD operations for warranties.
pub struct WarrantyRepo;

impl WarrantyRepo {
    /// Insert a new warranty. `start_date` defaults to now.
    pub async fn create(pool: &PgPool, input: &CreateWarranty) -> Result<Warranty, sqlx::Error> {
        let query = format!(
            "INSERT INTO warranties (laptop_id, provider, start_date, end_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(input.laptop_id)
            .bind(&input.provider)
            .bind(input.start_date.unwrap_or_else(Utc::now))
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM warranties WHERE id = $1");
        sqlx::query_as::<_, Warranty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The warranty for a laptop ending last, if any.
    pub async fn find_by_laptop(
        pool: &PgPool,
        laptop_id: DbId,
    ) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM warranties
             WHERE laptop_id = $1
             ORDER BY end_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(laptop_id)
            .fetch_optional(pool)
            .await
    }

    /// List warranties ending soonest first. `active_only` keeps those whose
    /// `end_date` has not passed.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Warranty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM warranties
             WHERE (NOT $1 OR end_date >= NOW())
             ORDER BY end_date, id"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a warranty. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWarranty,
    ) -> Result<Option<Warranty>, sqlx::Error> {
        let query = format!(
            "UPDATE warranties SET
                provider = COALESCE($2, provider),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Warranty>(&query)
            .bind(id)
            .bind(&input.provider)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM warranties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
