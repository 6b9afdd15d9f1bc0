//! Repository for the `admin_sessions` table.

use sqlx::PgPool;

use crate::models::admin_session::{AdminSession, CreateAdminSession, SessionUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, revoked_at, created_at, updated_at";

/// Provides persistence for admin sessions.
pub struct AdminSessionRepo;

impl AdminSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdminSession,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Resolve a live session and its user by token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_active(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<SessionUser>, sqlx::Error> {
        sqlx::query_as::<_, SessionUser>(
            "SELECT s.id AS session_id, u.id AS user_id, u.username, u.role
             FROM admin_sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = $1
               AND s.revoked_at IS NULL
               AND s.expires_at > NOW()",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke the session with `token_hash`. Returns `true` if a live
    /// session was revoked.
    pub async fn revoke(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET revoked_at = NOW()
             WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM admin_sessions WHERE expires_at < NOW() OR revoked_at IS NOT NULL",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
