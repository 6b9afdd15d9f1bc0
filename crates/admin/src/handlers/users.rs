//! Admin user management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use inventory_core::error::CoreError;
use inventory_core::principal::ROLE_ADMIN;
use inventory_db::models::user::{CreateUser, UserResponse};
use inventory_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use inventory_core::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::session::RequireAdmin;
use crate::response::ok;
use crate::state::AppState;

/// Request body for `POST /admin/users`. `role` defaults to `admin`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub user: UserResponse,
}

/// GET /admin/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(ok(UserList {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// POST /admin/users
///
/// A taken username is a 409 via `uq_users_username`.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.as_deref().map(str::trim).unwrap_or_default();
    if username.is_empty() {
        return Err(CoreError::Validation("Missing required field: username".into()).into());
    }
    let password = input.password.as_deref().unwrap_or_default();
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
    let role = input
        .role
        .as_deref()
        .map(|r| r.trim().to_ascii_lowercase())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| ROLE_ADMIN.to_string());

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, created_by = %admin.username, "Admin user created");
    Ok((
        StatusCode::CREATED,
        ok(UserDetail {
            user: UserResponse::from(user),
        }),
    ))
}
