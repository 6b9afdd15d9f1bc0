//! Storefront customer model and DTOs.

use inventory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `customers` table. Never serialize directly.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe customer representation for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
}

impl From<&Customer> for CustomerResponse {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
            name: c.name.clone(),
        }
    }
}

/// DTO for registering a customer. `email` is expected lowercased.
#[derive(Debug)]
pub struct CreateCustomer {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
