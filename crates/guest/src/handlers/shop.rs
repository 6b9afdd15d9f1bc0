//! Catalog browsing, proxied from the admin API.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use inventory_core::catalog::{CatalogLaptop, CatalogPart};
use inventory_core::error::CoreError;
use inventory_core::types::DbId;
use inventory_core::wire::{BrandList, LaptopList};
use serde::Serialize;

use crate::admin_api::LaptopQuery;
use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::response::ok;
use crate::state::AppState;

/// A laptop with every spare part that can be added to it.
#[derive(Debug, Serialize)]
pub struct ShopLaptop {
    pub laptop: CatalogLaptop,
    pub spare_parts: Vec<CatalogPart>,
}

/// GET /shop?brand=&price_min=&price_max=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LaptopQuery>,
) -> AppResult<impl IntoResponse> {
    let laptops = state.admin_api.list_laptops(&query).await?;
    Ok(ok(LaptopList { laptops }))
}

/// GET /shop/brands
pub async fn brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = state.admin_api.list_brands().await?;
    Ok(ok(BrandList { brands }))
}

/// GET /laptops/{id}
pub async fn laptop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let laptop = state
        .admin_api
        .get_laptop(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Laptop", id))?;
    let spare_parts = state.admin_api.list_spare_parts().await?;
    Ok(ok(ShopLaptop {
        laptop,
        spare_parts,
    }))
}
