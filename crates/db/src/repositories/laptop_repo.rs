//! Repository for the `laptops` and `serial_counters` tables.

use chrono::{NaiveDate, Utc};
use inventory_core::catalog::normalize_screen_size;
use inventory_core::serial::serial_number;
use inventory_core::status::LaptopStatus;
use inventory_core::types::DbId;
use sqlx::PgPool;

use crate::models::laptop::{
    CreateLaptop, Laptop, LaptopCounts, LaptopFilter, LaptopSummary, UpdateLaptop,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, serial_number, brand, model, cpu, ram, storage, screen_size, \
                       graphics, os, condition, description, purchase_price, selling_price, \
                       status, date_purchased, date_sold, image, image_filename, \
                       created_at, updated_at";

/// Columns for list views, without the embedded image.
const SUMMARY_COLUMNS: &str = "id, serial_number, brand, model, selling_price, status, \
                               date_purchased, date_sold, created_at";

/// Provides CRUD operations for laptops.
pub struct LaptopRepo;

impl LaptopRepo {
    /// Insert a new laptop, returning the created row.
    ///
    /// When `serial_number` is omitted one is allocated from the per-day
    /// counter in the same transaction as the insert.
    pub async fn create(pool: &PgPool, input: &CreateLaptop) -> Result<Laptop, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let date_purchased = input
            .date_purchased
            .unwrap_or_else(|| Utc::now().date_naive());
        let serial = match input.serial_number.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => Self::allocate_serial(&mut tx, &input.brand, date_purchased).await?,
        };

        let query = format!(
            "INSERT INTO laptops
                (serial_number, brand, model, cpu, ram, storage, screen_size, graphics, os,
                 condition, description, purchase_price, selling_price, date_purchased,
                 image, image_filename)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, 0), $13, $14,
                     $15, $16)
             RETURNING {COLUMNS}"
        );
        let laptop = sqlx::query_as::<_, Laptop>(&query)
            .bind(&serial)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.cpu)
            .bind(&input.ram)
            .bind(&input.storage)
            .bind(normalize_screen_size(input.screen_size.as_deref()))
            .bind(&input.graphics)
            .bind(&input.os)
            .bind(&input.condition)
            .bind(&input.description)
            .bind(input.purchase_price)
            .bind(input.selling_price)
            .bind(date_purchased)
            .bind(&input.image)
            .bind(&input.image_filename)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(laptop)
    }

    /// Draw the next same-day sequence number and format a serial number.
    ///
    /// The upsert is atomic, so two concurrent creations on the same day
    /// never receive the same sequence.
    pub async fn allocate_serial(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        brand: &str,
        date_purchased: NaiveDate,
    ) -> Result<String, sqlx::Error> {
        let (seq,): (i64,) = sqlx::query_as(
            "INSERT INTO serial_counters (day, last_seq) VALUES ($1, 1)
             ON CONFLICT (day) DO UPDATE SET last_seq = serial_counters.last_seq + 1
             RETURNING last_seq",
        )
        .bind(date_purchased)
        .fetch_one(&mut **tx)
        .await?;
        Ok(serial_number(brand, date_purchased, seq))
    }

    /// Find a laptop by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Laptop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM laptops WHERE id = $1");
        sqlx::query_as::<_, Laptop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every laptop in `ids` inside a transaction, locking the rows
    /// until it ends. Missing ids are simply absent from the result.
    pub async fn find_by_ids_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        ids: &[DbId],
    ) -> Result<Vec<Laptop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM laptops WHERE id = ANY($1) FOR UPDATE");
        sqlx::query_as::<_, Laptop>(&query)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Summaries for every laptop in `ids`.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<LaptopSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM laptops WHERE id = ANY($1)");
        sqlx::query_as::<_, LaptopSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List laptops matching `filter`, most recently created first.
    pub async fn list(pool: &PgPool, filter: &LaptopFilter) -> Result<Vec<Laptop>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM laptops
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR brand ILIKE '%' || $2 || '%')
               AND ($3::NUMERIC IS NULL OR selling_price >= $3)
               AND ($4::NUMERIC IS NULL OR selling_price <= $4)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Laptop>(&query)
            .bind(filter.status.map(LaptopStatus::as_str))
            .bind(filter.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()))
            .bind(filter.price_min)
            .bind(filter.price_max)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recently created laptops.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<LaptopSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM laptops ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, LaptopSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct brands of laptops currently available, alphabetically.
    pub async fn available_brands(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT brand FROM laptops WHERE status = 'available' ORDER BY brand",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(b,)| b).collect())
    }

    /// Update a laptop. Only non-`None` fields in `input` are applied.
    ///
    /// Moving to `sold` stamps `date_sold` if unset; moving back to
    /// `available` clears it and releases any order's claim. Returns `None`
    /// if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLaptop,
    ) -> Result<Option<Laptop>, sqlx::Error> {
        let query = format!(
            "UPDATE laptops SET
                brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                cpu = COALESCE($4, cpu),
                ram = COALESCE($5, ram),
                storage = COALESCE($6, storage),
                screen_size = COALESCE($7, screen_size),
                graphics = COALESCE($8, graphics),
                os = COALESCE($9, os),
                condition = COALESCE($10, condition),
                description = COALESCE($11, description),
                purchase_price = COALESCE($12, purchase_price),
                selling_price = COALESCE($13, selling_price),
                status = COALESCE($14, status),
                date_sold = CASE
                    WHEN $14 = 'sold' THEN COALESCE(date_sold, NOW())
                    WHEN $14 = 'available' THEN NULL
                    ELSE date_sold
                END,
                sold_order_id = CASE WHEN $14 = 'available' THEN NULL ELSE sold_order_id END,
                date_purchased = COALESCE($15, date_purchased),
                image = COALESCE($16, image),
                image_filename = COALESCE($17, image_filename)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Laptop>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.cpu)
            .bind(&input.ram)
            .bind(&input.storage)
            .bind(normalize_screen_size(input.screen_size.as_deref()))
            .bind(&input.graphics)
            .bind(&input.os)
            .bind(&input.condition)
            .bind(&input.description)
            .bind(input.purchase_price)
            .bind(input.selling_price)
            .bind(input.status.map(LaptopStatus::as_str))
            .bind(input.date_purchased)
            .bind(&input.image)
            .bind(&input.image_filename)
            .fetch_optional(pool)
            .await
    }

    /// Delete a laptop. Returns `true` if a row was removed.
    ///
    /// Warranties referencing the laptop are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM laptops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every laptop in `ids` sold on behalf of `order_id`, returning
    /// the ids that were claimed.
    ///
    /// Only available laptops, or laptops this order already claimed, are
    /// touched. A laptop sold elsewhere is left as is and missing from the
    /// result, so callers can tell a double sale from a successful one.
    pub async fn mark_sold(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        ids: &[DbId],
        order_id: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE laptops SET
                date_sold = CASE WHEN status = 'available' THEN NOW() ELSE date_sold END,
                status = 'sold',
                sold_order_id = $2
             WHERE id = ANY($1)
               AND (status = 'available' OR sold_order_id = $2)
             RETURNING id",
        )
        .bind(ids)
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Laptop counts by status.
    pub async fn counts(pool: &PgPool) -> Result<LaptopCounts, sqlx::Error> {
        sqlx::query_as::<_, LaptopCounts>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'available') AS available,
                COUNT(*) FILTER (WHERE status = 'sold') AS sold
             FROM laptops",
        )
        .fetch_one(pool)
        .await
    }
}
