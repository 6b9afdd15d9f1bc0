use std::sync::Arc;

use crate::admin_api::AdminApi;
use crate::cart_store::CartStore;
use crate::config::GuestConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Customer accounts.
    pub pool: inventory_db::DbPool,
    /// Storefront configuration.
    pub config: Arc<GuestConfig>,
    /// Catalog and order access through the admin service.
    pub admin_api: Arc<dyn AdminApi>,
    /// In-memory session carts.
    pub carts: Arc<CartStore>,
}
