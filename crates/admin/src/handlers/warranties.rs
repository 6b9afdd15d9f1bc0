//! Admin warranty ledger.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use inventory_core::error::CoreError;
use inventory_core::types::DbId;
use inventory_db::models::warranty::{CreateWarranty, UpdateWarranty, Warranty, WarrantyView};
use inventory_db::repositories::{LaptopRepo, WarrantyRepo};
use inventory_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::session::RequireAdmin;
use crate::query::ActiveOnlyParams;
use crate::response::{ok, Message};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WarrantyList {
    pub warranties: Vec<WarrantyView>,
}

#[derive(Debug, Serialize)]
pub struct WarrantyDetail {
    pub warranty: WarrantyView,
}

/// GET /admin/warranties?active_only=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ActiveOnlyParams>,
) -> AppResult<impl IntoResponse> {
    let warranties = WarrantyRepo::list(&state.pool, params.active_only).await?;
    let warranties = project(&state.pool, warranties).await?;
    Ok(ok(WarrantyList { warranties }))
}

/// POST /admin/warranties
///
/// The laptop must exist when the warranty is recorded.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWarranty>,
) -> AppResult<impl IntoResponse> {
    if LaptopRepo::find_by_id(&state.pool, input.laptop_id)
        .await?
        .is_none()
    {
        return Err(CoreError::not_found("Laptop", input.laptop_id).into());
    }
    let warranty = WarrantyRepo::create(&state.pool, &input).await?;
    tracing::info!(warranty_id = warranty.id, laptop_id = warranty.laptop_id, "Warranty recorded");
    let view = single(&state.pool, warranty).await?;
    Ok((StatusCode::CREATED, ok(WarrantyDetail { warranty: view })))
}

/// PUT /admin/warranties/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateWarranty>,
) -> AppResult<impl IntoResponse> {
    let warranty = WarrantyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Warranty", id))?;
    let view = single(&state.pool, warranty).await?;
    Ok(ok(WarrantyDetail { warranty: view }))
}

/// DELETE /admin/warranties/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !WarrantyRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Warranty", id).into());
    }
    Ok(ok(Message {
        message: "Warranty deleted",
    }))
}

/// Join laptop summaries and project days remaining. Warranties whose
/// laptop was deleted get `laptop: null`.
async fn project(pool: &DbPool, warranties: Vec<Warranty>) -> AppResult<Vec<WarrantyView>> {
    let mut laptop_ids: Vec<DbId> = warranties.iter().map(|w| w.laptop_id).collect();
    laptop_ids.sort_unstable();
    laptop_ids.dedup();

    let laptops: HashMap<DbId, _> = LaptopRepo::summaries_by_ids(pool, &laptop_ids)
        .await?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();

    let now = Utc::now();
    Ok(warranties
        .into_iter()
        .map(|w| {
            let laptop = laptops.get(&w.laptop_id).cloned();
            WarrantyView::new(w, laptop, now)
        })
        .collect())
}

async fn single(pool: &DbPool, warranty: Warranty) -> AppResult<WarrantyView> {
    let mut views = project(pool, vec![warranty]).await?;
    views
        .pop()
        .ok_or_else(|| CoreError::Internal("warranty projection lost its row".into()).into())
}
