//! Startup seeding.

use inventory_core::principal::ROLE_ADMIN;
use inventory_db::models::user::CreateUser;
use inventory_db::repositories::UserRepo;
use inventory_db::DbPool;

use inventory_core::password::hash_password;
use crate::config::DefaultAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured default admin unless a user with that username
/// already exists. Returns `true` if a user was created.
pub async fn ensure_default_admin(pool: &DbPool, admin: &DefaultAdmin) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Default admin already present");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(username = %admin.username, "Default admin account created");
    Ok(true)
}
