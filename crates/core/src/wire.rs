//! JSON bodies exchanged between the admin service's public API and the
//! guest storefront.
//!
//! Every response carries a `success` flag next to its payload fields.
//! Failures use [`ErrorBody`].

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogLaptop, CatalogPart, UnavailableItem};

/// `{ "success": true, ...payload }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// `{ "success": false, "error": ..., "code": ... }`, plus the rejected
/// selections when a checkout had nothing purchasable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<UnavailableItem>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
            unavailable: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaptopList {
    pub laptops: Vec<CatalogLaptop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaptopDetail {
    pub laptop: CatalogLaptop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePartList {
    pub spare_parts: Vec<CatalogPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePartDetail {
    pub spare_part: CatalogPart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandList {
    pub brands: Vec<String>,
}

/// An order under `"order"`. Generic so either side can pick its row type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail<O> {
    pub order: O,
}

/// Body of a status change request. Optional so a missing field reports
/// as a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: Option<String>,
}

/// Query string of an order lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLookup {
    pub email: Option<String>,
    pub order_id: Option<String>,
}
