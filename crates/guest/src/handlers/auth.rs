//! Customer accounts: register, login, logout, me.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use inventory_core::checkout::validate_input;
use inventory_core::error::CoreError;
use inventory_core::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use inventory_core::principal::{Principal, PrincipalInfo};
use inventory_db::models::customer::{CreateCustomer, Customer, CustomerResponse};
use inventory_db::repositories::CustomerRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookies::{auth_cookie, clear_auth_cookie};
use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::customer::CustomerPrincipal;
use crate::response::{ok, Message};
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(required)]
    pub password: Option<String>,
    #[validate(required)]
    pub confirm_password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response of register and login. The token is also set as a cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub customer: CustomerResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub customer: CustomerResponse,
    pub principal: PrincipalInfo,
}

/// POST /auth/register
///
/// A taken email is a 409 via `uq_customers_email`.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let email = input.email.unwrap_or_default().trim().to_lowercase();
    let name = input.name.unwrap_or_default().trim().to_string();
    let password = input.password.unwrap_or_default();
    if name.is_empty() {
        return Err(CoreError::Validation("Missing required field: name".into()).into());
    }
    validate_password_strength(&password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
    if input.confirm_password.as_deref() != Some(password.as_str()) {
        return Err(CoreError::Validation("Passwords do not match".into()).into());
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let customer = CustomerRepo::create(
        &state.pool,
        &CreateCustomer {
            email,
            password_hash,
            name,
        },
    )
    .await?;

    tracing::info!(customer_id = customer.id, "Customer registered");
    let (cookie, body) = issue_token(&state, &customer)?;
    Ok((StatusCode::CREATED, AppendHeaders([(SET_COOKIE, cookie)]), ok(body)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.as_deref().map(str::trim).unwrap_or_default();
    let password = input.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let customer = CustomerRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(password, &customer.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(customer_id = customer.id, "Failed customer login");
        return Err(invalid());
    }
    if !customer.is_active {
        return Err(CoreError::Unauthorized("Account is deactivated".into()).into());
    }

    tracing::info!(customer_id = customer.id, "Customer logged in");
    let (cookie, body) = issue_token(&state, &customer)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), ok(body)))
}

/// POST /auth/logout
///
/// Tokens are stateless, so this only expires the cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_auth_cookie(state.config.cookie_secure))]),
        ok(Message {
            message: "Logged out",
        }),
    )
}

/// GET /auth/me
pub async fn me(customer: CustomerPrincipal) -> AppResult<impl IntoResponse> {
    let principal = customer.info();
    Ok(ok(CustomerDetail {
        principal,
        customer: CustomerResponse {
            id: customer.customer_id,
            email: customer.email,
            name: customer.name,
        },
    }))
}

fn issue_token(state: &AppState, customer: &Customer) -> AppResult<(String, AuthResponse)> {
    let token = generate_token(customer.id, &customer.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = auth_cookie(
        &token,
        state.config.jwt.expiry_hours,
        state.config.cookie_secure,
    );
    Ok((
        cookie,
        AuthResponse {
            customer: CustomerResponse::from(customer),
            token,
        },
    ))
}
