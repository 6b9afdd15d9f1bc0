//! Shared response envelope for storefront handlers.

use axum::Json;
use inventory_core::wire::Envelope;
use serde::Serialize;

/// `Json(Envelope::ok(body))`.
pub fn ok<T: Serialize>(body: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(body))
}

/// Payload-free success.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
