//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use chrono::{Duration, Utc};
use inventory_core::error::CoreError;
use inventory_core::principal::{Principal, PrincipalInfo};
use inventory_db::models::admin_session::CreateAdminSession;
use inventory_db::repositories::{AdminSessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use inventory_core::password::verify_password;
use crate::auth::session::{clear_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::session::AdminPrincipal;
use crate::response::{ok, Message};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: PrincipalInfo,
    pub role: String,
}

/// POST /auth/login
///
/// Verify username + password and open a session. The token is only ever
/// sent as the `admin_session` cookie.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.as_deref().map(str::trim).unwrap_or_default();
    let password = input.password.as_deref().unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("Username and password are required".into()).into());
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username, "Failed admin login");
        return Err(invalid());
    }

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.config.session_ttl_hours);
    AdminSessionRepo::create(
        &state.pool,
        &CreateAdminSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin logged in");

    let cookie = session_cookie(
        &token,
        state.config.session_ttl_hours,
        state.config.cookie_secure,
    );
    let principal = AdminPrincipal {
        user_id: user.id,
        username: user.username,
        role: user.role,
        token_hash: String::new(),
    };
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        ok(SessionInfo {
            user: principal.info(),
            role: principal.role,
        }),
    ))
}

/// POST /auth/logout
///
/// Revoke the presented session and expire the cookie.
pub async fn logout(
    State(state): State<AppState>,
    admin: AdminPrincipal,
) -> AppResult<impl IntoResponse> {
    AdminSessionRepo::revoke(&state.pool, &admin.token_hash).await?;
    tracing::info!(user_id = admin.user_id, "Admin logged out");
    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))]),
        ok(Message {
            message: "Logged out",
        }),
    ))
}

/// GET /auth/me
pub async fn me(admin: AdminPrincipal) -> AppResult<impl IntoResponse> {
    Ok(ok(SessionInfo {
        user: admin.info(),
        role: admin.role,
    }))
}
