//! Shared response envelope for API handlers.
//!
//! Every JSON response is `{ "success": bool, ...payload }`. Handlers wrap
//! their payload with [`ok`] rather than building ad-hoc `json!` bodies.

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
