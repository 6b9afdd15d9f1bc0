//! HTTP handlers, one module per resource.

pub mod admin_orders;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod laptops;
pub mod orders;
pub mod spare_parts;
pub mod users;
pub mod warranties;
