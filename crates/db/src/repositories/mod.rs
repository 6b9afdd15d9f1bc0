//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must join a
//! caller's transaction take `&mut sqlx::Transaction<'_, sqlx::Postgres>`
//! instead.

pub mod admin_session_repo;
pub mod customer_repo;
pub mod laptop_repo;
pub mod order_repo;
pub mod spare_part_repo;
pub mod user_repo;
pub mod warranty_repo;

pub use admin_session_repo::AdminSessionRepo;
pub use customer_repo::CustomerRepo;
pub use laptop_repo::LaptopRepo;
pub use order_repo::OrderRepo;
pub use spare_part_repo::SparePartRepo;
pub use user_repo::UserRepo;
pub use warranty_repo::WarrantyRepo;
