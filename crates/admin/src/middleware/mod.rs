//! Authentication and authorization extractors.
//!
//! - [`session::AdminPrincipal`] -- resolves the `admin_session` cookie to a user.
//! - [`session::RequireAdmin`] -- additionally requires the `admin` role.

pub mod session;
