//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod admin_session;
pub mod customer;
pub mod laptop;
pub mod order;
pub mod spare_part;
pub mod user;
pub mod warranty;
