//! Inventory domain core.
//!
//! Pure domain logic shared by the admin service and the guest storefront:
//! identifiers, statuses, the session cart, price projection, checkout
//! planning, warranty math and password hashing. Nothing in this crate
//! touches the database or the network.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order_id;
pub mod password;
pub mod principal;
pub mod serial;
pub mod status;
pub mod types;
pub mod warranty;
pub mod wire;
