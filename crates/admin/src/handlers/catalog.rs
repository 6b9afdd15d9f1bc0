//! Public read-only catalog consumed by the guest storefront.
//!
//! Only customer-safe fields leave through these handlers; purchase prices
//! stay on the admin side.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use inventory_core::error::CoreError;
use inventory_core::status::LaptopStatus;
use inventory_core::types::DbId;
use inventory_core::wire::{BrandList, LaptopDetail, LaptopList, SparePartDetail, SparePartList};
use inventory_db::models::laptop::LaptopFilter;
use inventory_db::repositories::{LaptopRepo, SparePartRepo};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::query::{LaptopParams, SparePartParams};
use crate::response::ok;
use crate::state::AppState;

/// GET /api/laptops?brand=&price_min=&price_max=
///
/// Available laptops only.
pub async fn list_laptops(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LaptopParams>,
) -> AppResult<impl IntoResponse> {
    let filter = LaptopFilter {
        status: Some(LaptopStatus::Available),
        brand: params.brand,
        price_min: params.price_min,
        price_max: params.price_max,
    };
    let laptops = LaptopRepo::list(&state.pool, &filter).await?;
    Ok(ok(LaptopList {
        laptops: laptops.iter().map(|l| l.to_catalog()).collect(),
    }))
}

/// GET /api/laptops/brands
pub async fn list_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = LaptopRepo::available_brands(&state.pool).await?;
    Ok(ok(BrandList { brands }))
}

/// GET /api/laptops/{id}
///
/// Any status, so callers can tell "sold" from "missing".
pub async fn get_laptop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let laptop = LaptopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Laptop", id))?;
    Ok(ok(LaptopDetail {
        laptop: laptop.to_catalog(),
    }))
}

/// GET /api/spare-parts?type=
pub async fn list_spare_parts(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SparePartParams>,
) -> AppResult<impl IntoResponse> {
    let parts = SparePartRepo::list(&state.pool, params.part_type.as_deref()).await?;
    Ok(ok(SparePartList {
        spare_parts: parts.iter().map(|p| p.to_catalog()).collect(),
    }))
}

/// GET /api/spare-parts/{id}
pub async fn get_spare_part(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let part = SparePartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("SparePart", id))?;
    Ok(ok(SparePartDetail {
        spare_part: part.to_catalog(),
    }))
}
