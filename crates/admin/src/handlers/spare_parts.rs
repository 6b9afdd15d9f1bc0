//! Admin spare part management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use inventory_core::error::CoreError;
use inventory_core::types::DbId;
use inventory_db::models::spare_part::{CreateSparePart, SparePart, UpdateSparePart};
use inventory_db::repositories::SparePartRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::session::RequireAdmin;
use crate::query::SparePartParams;
use crate::response::{ok, Message};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminSparePartList {
    pub spare_parts: Vec<SparePart>,
}

#[derive(Debug, Serialize)]
pub struct AdminSparePartDetail {
    pub spare_part: SparePart,
}

/// GET /admin/spare-parts?type=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SparePartParams>,
) -> AppResult<impl IntoResponse> {
    let spare_parts = SparePartRepo::list(&state.pool, params.part_type.as_deref()).await?;
    Ok(ok(AdminSparePartList { spare_parts }))
}

/// POST /admin/spare-parts
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSparePart>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() || input.part_type.trim().is_empty() {
        return Err(CoreError::Validation("Spare parts need a name and a type".into()).into());
    }
    let spare_part = SparePartRepo::create(&state.pool, &input).await?;
    tracing::info!(part_id = spare_part.id, name = %spare_part.name, "Spare part created");
    Ok((StatusCode::CREATED, ok(AdminSparePartDetail { spare_part })))
}

/// PUT /admin/spare-parts/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateSparePart>,
) -> AppResult<impl IntoResponse> {
    let spare_part = SparePartRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("SparePart", id))?;
    Ok(ok(AdminSparePartDetail { spare_part }))
}

/// DELETE /admin/spare-parts/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SparePartRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("SparePart", id).into());
    }
    Ok(ok(Message {
        message: "Spare part deleted",
    }))
}
