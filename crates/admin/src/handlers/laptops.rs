//! Admin laptop management, including purchase prices.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use inventory_core::error::CoreError;
use inventory_core::status::LaptopStatus;
use inventory_core::types::{DbId, Money};
use inventory_db::models::laptop::{CreateLaptop, Laptop, LaptopFilter, UpdateLaptop};
use inventory_db::models::warranty::WarrantyView;
use inventory_db::repositories::{LaptopRepo, WarrantyRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::warranties::WarrantyDetail;
use crate::middleware::session::RequireAdmin;
use crate::query::{parse_filter, LaptopParams};
use crate::response::{ok, Message};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminLaptopList {
    pub laptops: Vec<Laptop>,
}

#[derive(Debug, Serialize)]
pub struct AdminLaptopDetail {
    pub laptop: Laptop,
}

/// GET /admin/laptops?status=&brand=&price_min=&price_max=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LaptopParams>,
) -> AppResult<impl IntoResponse> {
    let filter = LaptopFilter {
        status: parse_filter::<LaptopStatus>(params.status.as_deref())?,
        brand: params.brand,
        price_min: params.price_min,
        price_max: params.price_max,
    };
    let laptops = LaptopRepo::list(&state.pool, &filter).await?;
    Ok(ok(AdminLaptopList { laptops }))
}

/// POST /admin/laptops
///
/// The serial number is generated when omitted.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLaptop>,
) -> AppResult<impl IntoResponse> {
    require_text("brand", &input.brand)?;
    require_text("model", &input.model)?;
    require_non_negative("selling_price", Some(input.selling_price))?;
    require_non_negative("purchase_price", input.purchase_price)?;

    let laptop = LaptopRepo::create(&state.pool, &input).await?;
    tracing::info!(
        laptop_id = laptop.id,
        serial_number = %laptop.serial_number,
        admin = %admin.username,
        "Laptop created"
    );
    Ok((StatusCode::CREATED, ok(AdminLaptopDetail { laptop })))
}

/// GET /admin/laptops/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let laptop = LaptopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Laptop", id))?;
    Ok(ok(AdminLaptopDetail { laptop }))
}

/// PUT /admin/laptops/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateLaptop>,
) -> AppResult<impl IntoResponse> {
    if let Some(brand) = &input.brand {
        require_text("brand", brand)?;
    }
    if let Some(model) = &input.model {
        require_text("model", model)?;
    }
    require_non_negative("selling_price", input.selling_price)?;
    require_non_negative("purchase_price", input.purchase_price)?;

    let laptop = LaptopRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Laptop", id))?;
    Ok(ok(AdminLaptopDetail { laptop }))
}

/// DELETE /admin/laptops/{id}
///
/// Warranties for the laptop are kept.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LaptopRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Laptop", id).into());
    }
    tracing::info!(laptop_id = id, admin = %admin.username, "Laptop deleted");
    Ok(ok(Message {
        message: "Laptop deleted",
    }))
}

/// GET /admin/laptops/{id}/warranty
pub async fn warranty(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let warranty = WarrantyRepo::find_by_laptop(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Warranty", format!("laptop {id}")))?;
    let laptop = LaptopRepo::summaries_by_ids(&state.pool, &[id])
        .await?
        .into_iter()
        .next();
    Ok(ok(WarrantyDetail {
        warranty: WarrantyView::new(warranty, laptop, Utc::now()),
    }))
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("Missing required field: {field}")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Option<Money>) -> Result<(), CoreError> {
    match value {
        Some(v) if v < Money::ZERO => Err(CoreError::Validation(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}
