//! Spare part entity model and DTOs.

use inventory_core::catalog::CatalogPart;
use inventory_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full spare part row from the `spare_parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SparePart {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub part_type: String,
    pub price: Money,
    pub quantity: i32,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SparePart {
    pub fn to_catalog(&self) -> CatalogPart {
        CatalogPart {
            id: self.id,
            name: self.name.clone(),
            part_type: self.part_type.clone(),
            price: self.price,
            quantity: self.quantity,
            description: self.description.clone(),
        }
    }
}

/// DTO for creating a new spare part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSparePart {
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: String,
    pub price: Money,
    pub quantity: Option<i32>,
    pub description: Option<String>,
}

/// DTO for updating an existing spare part. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSparePart {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub part_type: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i32>,
    pub description: Option<String>,
}
