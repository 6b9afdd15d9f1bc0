//! Customer token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use inventory_core::error::CoreError;
use inventory_core::principal::{Principal, PrincipalKind};
use inventory_core::types::DbId;
use inventory_db::repositories::CustomerRepo;

use crate::auth::cookies::{read_cookie, AUTH_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The customer behind a valid token.
///
/// The token is read from the `auth_token` cookie, falling back to an
/// `Authorization: Bearer` header. Missing, malformed, expired or
/// foreign-signed tokens and missing or deactivated accounts all reject
/// with 401.
#[derive(Debug, Clone)]
pub struct CustomerPrincipal {
    pub customer_id: DbId,
    pub email: String,
    pub name: String,
}

impl Principal for CustomerPrincipal {
    fn kind(&self) -> PrincipalKind {
        PrincipalKind::Customer
    }

    fn subject_id(&self) -> DbId {
        self.customer_id
    }

    fn login(&self) -> &str {
        &self.email
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// The presented token, cookie first.
fn presented_token(parts: &Parts) -> Option<String> {
    read_cookie(&parts.headers, AUTH_COOKIE)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
        })
}

impl FromRequestParts<AppState> for CustomerPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts).ok_or_else(|| unauthorized("Login required"))?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let customer = CustomerRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        Ok(CustomerPrincipal {
            customer_id: customer.id,
            email: customer.email,
            name: customer.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/auth/me");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let p = parts(&[
            ("cookie", "auth_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(presented_token(&p).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_is_used_without_cookie() {
        let p = parts(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(presented_token(&p).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let p = parts(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(presented_token(&p), None);
    }
}
