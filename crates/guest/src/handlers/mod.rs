//! HTTP handlers, one module per resource.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod shop;
