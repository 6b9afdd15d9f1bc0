//! Admin session model. Only the SHA-256 hash of the session token is stored.

use inventory_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a session.
#[derive(Debug)]
pub struct CreateAdminSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// A live session joined with its user.
#[derive(Debug, Clone, FromRow)]
pub struct SessionUser {
    pub session_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}
