//! Authentication primitives.
//!
//! - [`jwt`] -- signed customer tokens.
//! - [`cookies`] -- reading and building the storefront's cookies.

pub mod cookies;
pub mod jwt;
