//! JWT authentication for the dashboard and virtual store.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::models::UserRole;
use shared::{AppError, ErrorCode};

use crate::state::AppState;

const JWT_EXPIRY_HOURS: i64 = 24;

/// JWT claims. `sub` is the employee or customer row id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Create a signed token valid for 24 hours.
pub fn create_token(
    id: i64,
    email: &str,
    name: &str,
    role: UserRole,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that verifies the Bearer token and injects an [`Identity`]
/// extension for the handlers downstream.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid).into_response())?;

    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        let code = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ErrorCode::TokenExpired,
            _ => ErrorCode::TokenInvalid,
        };
        AppError::new(code).into_response()
    })?;

    let claims = token_data.claims;
    request.extensions_mut().insert(Identity {
        id: claims.sub,
        email: claims.email,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Middleware layered after [`auth_middleware`] on staff-only routes.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    let is_admin = request
        .extensions()
        .get::<Identity>()
        .map(Identity::is_admin)
        .unwrap_or(false);

    if !is_admin {
        return Err(AppError::new(ErrorCode::AdminRequired).into_response());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(7, "ana@example.com", "Ana", UserRole::Admin, "secret").unwrap();

        let data = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, 7);
        assert_eq!(data.claims.email, "ana@example.com");
        assert_eq!(data.claims.role, UserRole::Admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(7, "ana@example.com", "Ana", UserRole::Customer, "secret").unwrap();

        let result = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
