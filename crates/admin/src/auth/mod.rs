//! Opaque admin session tokens and the session cookie.

pub mod session;
