//! Session-cookie authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inventory_core::error::CoreError;
use inventory_core::principal::{Principal, PrincipalKind, ROLE_ADMIN};
use inventory_core::types::DbId;
use inventory_db::repositories::AdminSessionRepo;

use crate::auth::session::{hash_session_token, read_cookie, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The admin user behind a live session cookie.
///
/// Fails closed with 401 when the cookie is absent, unknown, expired or
/// revoked.
#[derive(Debug, Clone)]
pub struct AdminPrincipal {
    pub user_id: DbId,
    pub username: String,
    pub role: String,
    /// Hash of the presented token, used to revoke it on logout.
    pub token_hash: String,
}

impl Principal for AdminPrincipal {
    fn kind(&self) -> PrincipalKind {
        PrincipalKind::Admin
    }

    fn subject_id(&self) -> DbId {
        self.user_id
    }

    fn login(&self) -> &str {
        &self.username
    }
}

impl FromRequestParts<AppState> for AdminPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, SESSION_COOKIE).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Login required".into()))
        })?;

        let token_hash = hash_session_token(&token);
        let session = AdminSessionRepo::find_active(&state.pool, &token_hash)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
            })?;

        Ok(AdminPrincipal {
            user_id: session.user_id,
            username: session.username,
            role: session.role,
            token_hash,
        })
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AdminPrincipal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = AdminPrincipal::from_request_parts(parts, state).await?;
        if admin.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(admin))
    }
}
