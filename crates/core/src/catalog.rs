//! Public catalog views and price resolution.
//!
//! [`CatalogLaptop`] and [`CatalogPart`] are the shapes the admin service
//! publishes on its REST API and the guest storefront consumes. A
//! [`CatalogSnapshot`] holds the records resolved for one request and prices
//! laptop + accessory selections against them.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::LaptopStatus;
use crate::types::{DbId, Money};

/// A laptop as seen by customers. Purchase price is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLaptop {
    pub id: DbId,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub screen_size: Option<String>,
    #[serde(default)]
    pub graphics: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub selling_price: Money,
    pub status: LaptopStatus,
    #[serde(default)]
    pub date_purchased: Option<NaiveDate>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
}

/// A spare part offered as a laptop accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPart {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: String,
    pub price: Money,
    pub quantity: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Why a selection could not be priced or purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    LaptopNotFound,
    LaptopNotAvailable { status: LaptopStatus },
    SparePartNotFound { part_id: DbId },
}

/// A selection rejected during projection or checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableItem {
    pub laptop_id: DbId,
    #[serde(flatten)]
    pub reason: UnavailableReason,
}

impl fmt::Display for UnavailableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            UnavailableReason::LaptopNotFound => {
                write!(f, "laptop {} no longer exists", self.laptop_id)
            }
            UnavailableReason::LaptopNotAvailable { status } => {
                write!(f, "laptop {} is {status}", self.laptop_id)
            }
            UnavailableReason::SparePartNotFound { part_id } => write!(
                f,
                "spare part {part_id} selected for laptop {} no longer exists",
                self.laptop_id
            ),
        }
    }
}

/// A selection priced against the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLine {
    pub laptop: CatalogLaptop,
    pub spare_parts: Vec<CatalogPart>,
    pub base_price: Money,
    pub total_price: Money,
}

/// Catalog records resolved for a single cart read or checkout.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    laptops: HashMap<DbId, CatalogLaptop>,
    parts: HashMap<DbId, CatalogPart>,
}

impl CatalogSnapshot {
    pub fn new(
        laptops: impl IntoIterator<Item = CatalogLaptop>,
        parts: impl IntoIterator<Item = CatalogPart>,
    ) -> Self {
        Self {
            laptops: laptops.into_iter().map(|l| (l.id, l)).collect(),
            parts: parts.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn laptop(&self, id: DbId) -> Option<&CatalogLaptop> {
        self.laptops.get(&id)
    }

    pub fn part(&self, id: DbId) -> Option<&CatalogPart> {
        self.parts.get(&id)
    }

    /// Price one laptop + accessory selection.
    ///
    /// Fails when the laptop is missing or not `available`, or when any
    /// selected part is missing. `total_price` is the laptop's selling price
    /// plus every selected part's price.
    pub fn price(
        &self,
        laptop_id: DbId,
        spare_part_ids: &[DbId],
    ) -> Result<PricedLine, UnavailableItem> {
        let reject = |reason| UnavailableItem { laptop_id, reason };

        let laptop = self
            .laptop(laptop_id)
            .ok_or_else(|| reject(UnavailableReason::LaptopNotFound))?;
        if laptop.status != LaptopStatus::Available {
            return Err(reject(UnavailableReason::LaptopNotAvailable {
                status: laptop.status,
            }));
        }

        let spare_parts = spare_part_ids
            .iter()
            .map(|&part_id| {
                self.part(part_id)
                    .cloned()
                    .ok_or_else(|| reject(UnavailableReason::SparePartNotFound { part_id }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let base_price = laptop.selling_price;
        let total_price = base_price + spare_parts.iter().map(|p| p.price).sum::<Money>();

        Ok(PricedLine {
            laptop: laptop.clone(),
            spare_parts,
            base_price,
            total_price,
        })
    }
}

/// Normalize an entered screen size for display: a bare number such as
/// `15.6` gains a trailing inch mark. Blank input becomes `None`.
pub fn normalize_screen_size(raw: Option<&str>) -> Option<String> {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
    if trimmed.ends_with('"') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}\""))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use rust_decimal::Decimal;

    pub fn laptop(id: DbId, price: i64) -> CatalogLaptop {
        CatalogLaptop {
            id,
            serial_number: format!("DE25010{id}01"),
            brand: "Dell".into(),
            model: format!("Latitude {id}"),
            cpu: None,
            ram: None,
            storage: None,
            screen_size: None,
            graphics: None,
            os: None,
            condition: None,
            description: None,
            selling_price: Decimal::new(price, 0),
            status: LaptopStatus::Available,
            date_purchased: None,
            image: None,
            image_filename: None,
        }
    }

    pub fn sold_laptop(id: DbId, price: i64) -> CatalogLaptop {
        CatalogLaptop {
            status: LaptopStatus::Sold,
            ..laptop(id, price)
        }
    }

    pub fn part(id: DbId, price: i64) -> CatalogPart {
        CatalogPart {
            id,
            name: format!("Part {id}"),
            part_type: "RAM".into(),
            price: Decimal::new(price, 0),
            quantity: 10,
            description: None,
        }
    }
}
