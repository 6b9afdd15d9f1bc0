//! Laptop entity model and DTOs.

use chrono::NaiveDate;
use inventory_core::catalog::CatalogLaptop;
use inventory_core::status::LaptopStatus;
use inventory_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full laptop row from the `laptops` table.
///
/// Includes `purchase_price`; use [`Laptop::to_catalog`] for anything
/// customers can see.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Laptop {
    pub id: DbId,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub screen_size: Option<String>,
    pub graphics: Option<String>,
    pub os: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Money,
    pub selling_price: Money,
    #[sqlx(try_from = "String")]
    pub status: LaptopStatus,
    pub date_purchased: NaiveDate,
    pub date_sold: Option<Timestamp>,
    pub image: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Laptop {
    /// Customer-facing view of this laptop.
    pub fn to_catalog(&self) -> CatalogLaptop {
        CatalogLaptop {
            id: self.id,
            serial_number: self.serial_number.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            cpu: self.cpu.clone(),
            ram: self.ram.clone(),
            storage: self.storage.clone(),
            screen_size: self.screen_size.clone(),
            graphics: self.graphics.clone(),
            os: self.os.clone(),
            condition: self.condition.clone(),
            description: self.description.clone(),
            selling_price: self.selling_price,
            status: self.status,
            date_purchased: Some(self.date_purchased),
            image: self.image.clone(),
            image_filename: self.image_filename.clone(),
        }
    }
}

/// Laptop row without the embedded image, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LaptopSummary {
    pub id: DbId,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub selling_price: Money,
    #[sqlx(try_from = "String")]
    pub status: LaptopStatus,
    pub date_purchased: NaiveDate,
    pub date_sold: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new laptop.
///
/// `serial_number` is generated from brand and purchase date when omitted.
/// `date_purchased` defaults to today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLaptop {
    pub serial_number: Option<String>,
    pub brand: String,
    pub model: String,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub screen_size: Option<String>,
    pub graphics: Option<String>,
    pub os: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Option<Money>,
    pub selling_price: Money,
    pub date_purchased: Option<NaiveDate>,
    pub image: Option<String>,
    pub image_filename: Option<String>,
}

/// DTO for updating an existing laptop. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLaptop {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub screen_size: Option<String>,
    pub graphics: Option<String>,
    pub os: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Option<Money>,
    pub selling_price: Option<Money>,
    pub status: Option<LaptopStatus>,
    pub date_purchased: Option<NaiveDate>,
    pub image: Option<String>,
    pub image_filename: Option<String>,
}

/// Listing filters. Every field narrows the result when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaptopFilter {
    pub status: Option<LaptopStatus>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
}

/// Laptop counts by status.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct LaptopCounts {
    pub total: i64,
    pub available: i64,
    pub sold: i64,
}
