//! Order engine: transactional checkout and status transitions.
//!
//! Both operations run inside a single database transaction so a failure
//! leaves neither a half-written order nor a half-applied sold cascade.

pub mod checkout;
pub mod status;

pub use checkout::{place_order, PlacedOrderResult};
pub use status::update_status;
