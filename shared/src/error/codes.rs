//! Unified error codes for the mesa POS workspace
//!
//! Error codes are shared between the server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Table errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been settled
    OrderAlreadySettled = 4002,
    /// Order is awaiting payment and its items are locked
    OrderLockedForPayment = 4003,
    /// Order item not found
    OrderItemNotFound = 4004,
    /// Order is empty
    OrderEmpty = 4005,
    /// Target status is not a valid kitchen status
    InvalidKitchenStatus = 4006,
    /// Order is not awaiting payment
    OrderNotAwaitingPayment = 4007,
    /// Cannot merge an order into itself
    MergeIntoSelf = 4008,

    // ==================== 5xxx: Payment ====================
    /// Payment amount is invalid
    PaymentInvalidAmount = 5001,
    /// Registered payments do not cover the order total
    SplitPaymentIncomplete = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Category not found
    CategoryNotFound = 6101,

    // ==================== 7xxx: Table ====================
    /// Table is occupied by an open order
    TableOccupied = 7001,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email is already registered
    EmailExists = 8002,
    /// Password is too short
    PasswordTooShort = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadySettled => "Order has already been settled",
            ErrorCode::OrderLockedForPayment => "Order is awaiting payment; items are locked",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::InvalidKitchenStatus => "Invalid kitchen status",
            ErrorCode::OrderNotAwaitingPayment => "Order is not awaiting payment",
            ErrorCode::MergeIntoSelf => "Cannot merge an order into itself",

            // Payment
            ErrorCode::PaymentInvalidAmount => "Payment amount is invalid",
            ErrorCode::SplitPaymentIncomplete => "Registered payments do not cover the order total",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::CategoryNotFound => "Category not found",

            // Table
            ErrorCode::TableOccupied => "Table is occupied",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadySettled),
            4003 => Ok(ErrorCode::OrderLockedForPayment),
            4004 => Ok(ErrorCode::OrderItemNotFound),
            4005 => Ok(ErrorCode::OrderEmpty),
            4006 => Ok(ErrorCode::InvalidKitchenStatus),
            4007 => Ok(ErrorCode::OrderNotAwaitingPayment),
            4008 => Ok(ErrorCode::MergeIntoSelf),

            // Payment
            5001 => Ok(ErrorCode::PaymentInvalidAmount),
            5002 => Ok(ErrorCode::SplitPaymentIncomplete),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6101 => Ok(ErrorCode::CategoryNotFound),

            // Table
            7001 => Ok(ErrorCode::TableOccupied),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailExists),
            8003 => Ok(ErrorCode::PasswordTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::OrderNotFound,
            ErrorCode::TableOccupied,
            ErrorCode::SplitPaymentIncomplete,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::OrderNotFound);
    }
}
