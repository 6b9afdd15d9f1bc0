//! Shared query parameter types for API handlers.

use std::str::FromStr;

use inventory_core::error::CoreError;
use inventory_core::types::Money;
use serde::Deserialize;

/// `?status=` filter. Parsed by the handler so a bad value reports as a
/// validation error.
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

/// Laptop listing filters (`?status=&brand=&price_min=&price_max=`).
#[derive(Debug, Default, Deserialize)]
pub struct LaptopParams {
    pub status: Option<String>,
    pub brand: Option<String>,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
}

/// `?type=` filter for spare parts.
#[derive(Debug, Default, Deserialize)]
pub struct SparePartParams {
    #[serde(rename = "type")]
    pub part_type: Option<String>,
}

/// `?active_only=` filter for warranties.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveOnlyParams {
    #[serde(default)]
    pub active_only: bool,
}

/// Parse an optional filter value, treating a blank string as absent.
pub fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
