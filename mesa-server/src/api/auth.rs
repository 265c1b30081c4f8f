//! Authentication endpoints: customer sign-up and shared login.

use axum::{Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, UserRole};
use shared::{AppError, ErrorCode};

use super::ApiResult;
use crate::auth::create_token;
use crate::db::{self, is_unique_violation};
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 6;

/// POST /api/auth/registrar
///
/// Virtual-store customer sign-up. Employees are provisioned through the
/// bootstrap config, never through this endpoint.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let name = req.name.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("a valid email is required"));
    }
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let customer = match db::customers::create(
        &state.pool,
        &email,
        name,
        &hash,
        req.phone.as_deref(),
        req.address.as_deref(),
    )
    .await
    {
        Ok(customer) => customer,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::EmailExists));
        }
        Err(e) => {
            tracing::error!("DB error during registration: {e}");
            return Err(AppError::new(ErrorCode::InternalError));
        }
    };

    let token = issue_token(&state, customer.id, &customer.email, &customer.name, UserRole::Customer)?;
    tracing::info!(customer_id = customer.id, "customer registered");

    Ok(Json(LoginResponse {
        token,
        name: customer.name,
        role: UserRole::Customer,
    }))
}

/// POST /api/auth/login
///
/// One endpoint for staff and customers: staff log in with their
/// username, customers with their email. Failures are uniform
/// `InvalidCredentials` to prevent account enumeration.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let login = req.email.trim().to_lowercase();

    if let Some(employee) = db::employees::find_by_username(&state.pool, &login)
        .await
        .map_err(internal)?
    {
        if !verify_password(&req.password, &employee.password_hash) {
            return Err(AppError::invalid_credentials());
        }
        let token = issue_token(&state, employee.id, &employee.username, &employee.name, UserRole::Admin)?;
        return Ok(Json(LoginResponse {
            token,
            name: employee.name,
            role: UserRole::Admin,
        }));
    }

    let customer = db::customers::find_by_email(&state.pool, &login)
        .await
        .map_err(internal)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &customer.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, customer.id, &customer.email, &customer.name, UserRole::Customer)?;
    Ok(Json(LoginResponse {
        token,
        name: customer.name,
        role: UserRole::Customer,
    }))
}

fn issue_token(
    state: &AppState,
    id: i64,
    email: &str,
    name: &str,
    role: UserRole,
) -> Result<String, AppError> {
    create_token(id, email, name, role, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

fn internal(e: sqlx::Error) -> AppError {
    tracing::error!("DB error during login: {e}");
    AppError::new(ErrorCode::InternalError)
}
