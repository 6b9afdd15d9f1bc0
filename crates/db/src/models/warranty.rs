//! Warranty entity model, DTOs, and the days-remaining read view.

use inventory_core::types::{DbId, Timestamp};
use inventory_core::warranty::{days_remaining, is_active};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::laptop::LaptopSummary;

/// Full warranty row from the `warranties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warranty {
    pub id: DbId,
    pub laptop_id: DbId,
    pub provider: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a warranty. `start_date` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWarranty {
    pub laptop_id: DbId,
    pub provider: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Timestamp,
    pub notes: Option<String>,
}

/// DTO for updating a warranty. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWarranty {
    pub provider: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Warranty joined with its laptop (if it still exists) and projected
/// against the current time.
#[derive(Debug, Clone, Serialize)]
pub struct WarrantyView {
    #[serde(flatten)]
    pub warranty: Warranty,
    pub laptop: Option<LaptopSummary>,
    pub days_remaining: i64,
    pub is_active: bool,
}

impl WarrantyView {
    pub fn new(warranty: Warranty, laptop: Option<LaptopSummary>, now: Timestamp) -> Self {
        Self {
            days_remaining: days_remaining(warranty.end_date, now),
            is_active: is_active(warranty.end_date, now),
            warranty,
            laptop,
        }
    }
}
