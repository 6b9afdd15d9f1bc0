//! Inventory guest storefront library.
//!
//! Customer accounts, the session cart and checkout. Catalog reads and
//! order writes go through the admin service's public API via
//! [`admin_api::AdminApi`]; only customer accounts live in this service's
//! database.

pub mod admin_api;
pub mod background;
pub mod auth;
pub mod cart_store;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
