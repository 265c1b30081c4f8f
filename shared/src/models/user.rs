//! User wire types
//!
//! Password hashes never leave the server; the row structs live in the
//! server's db layer. Only the wire-facing types are shared.

use serde::{Deserialize, Serialize};

/// Role claim embedded in the auth token
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Dashboard/KDS staff
    Admin,
    /// Virtual-store customer
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
        }
    }
}

/// Customer registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Login payload (employees and customers share the endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub role: UserRole,
}
