//! Inventory admin service library.
//!
//! Owns the catalog, orders, warranties and admin users. Exposes the
//! building blocks (config, state, error handling, routes) so integration
//! tests and the binary entrypoint share the same router.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
