use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inventory_core::catalog::UnavailableItem;
use inventory_core::error::CoreError;
use inventory_core::wire::ErrorBody;

use crate::admin_api::AdminApiError;

/// Application-level error type for storefront handlers.
///
/// Wraps [`CoreError`] for domain errors, [`AdminApiError`] for calls to the
/// admin service, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce `{ success: false, error, code }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inventory_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failed call to the admin service.
    #[error(transparent)]
    Upstream(#[from] AdminApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut unavailable: Vec<UnavailableItem> = Vec::new();

        let (status, code, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND".to_string(),
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string(), msg)
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT".to_string(), msg),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED".to_string(), msg)
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN".to_string(), msg),
                CoreError::EmptyCart => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EMPTY_CART".to_string(),
                    "Cart is empty".to_string(),
                ),
                CoreError::Unavailable(items) => {
                    let message = items
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    unavailable = items;
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "UNAVAILABLE".to_string(),
                        message,
                    )
                }
                CoreError::Internal(msg) => internal(&msg),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- Admin service errors ---
            AppError::Upstream(err) => classify_upstream_error(err, &mut unavailable),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string(), msg),
            AppError::InternalError(msg) => internal(&msg),
        };

        let mut body = ErrorBody::new(code, message);
        body.unavailable = unavailable;
        (status, Json(body)).into_response()
    }
}

fn internal(msg: &str) -> (StatusCode, String, String) {
    tracing::error!(error = %msg, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR".to_string(),
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND".to_string(),
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_")) =>
        {
            (
                StatusCode::CONFLICT,
                "CONFLICT".to_string(),
                format!(
                    "Duplicate value violates unique constraint: {}",
                    db_err.constraint().unwrap_or_default()
                ),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Client errors reported by the admin service pass through with their
/// status, code and availability report. Anything else is a 502.
fn classify_upstream_error(
    err: AdminApiError,
    unavailable: &mut Vec<UnavailableItem>,
) -> (StatusCode, String, String) {
    if let AdminApiError::Rejected { status, body } = &err {
        if let Ok(status) = StatusCode::from_u16(*status) {
            if status.is_client_error() {
                *unavailable = body.unavailable.clone();
                return (status, body.code.clone(), body.error.clone());
            }
        }
    }
    tracing::error!(error = %err, "Admin API call failed");
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR".to_string(),
        "The inventory service is unavailable".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use inventory_core::catalog::UnavailableReason;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_client_error_passes_through() {
        let mut body = ErrorBody::new("UNAVAILABLE", "nothing left");
        body.unavailable = vec![UnavailableItem {
            laptop_id: 3,
            reason: UnavailableReason::LaptopNotFound,
        }];
        let (status, json) = render(AppError::Upstream(AdminApiError::Rejected {
            status: 422,
            body,
        }))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "UNAVAILABLE");
        assert_eq!(json["unavailable"][0]["laptop_id"], 3);
    }

    #[tokio::test]
    async fn upstream_server_error_is_bad_gateway() {
        let (status, json) = render(AppError::Upstream(AdminApiError::Status {
            status: 500,
            body: "boom".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "UPSTREAM_ERROR");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let (status, json) =
            render(AppError::Core(CoreError::Unauthorized("Login required".into()))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Login required");
    }
}
