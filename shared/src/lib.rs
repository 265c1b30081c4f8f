//! Shared types for the mesa POS workspace
//!
//! Domain models, status enums and the unified error/response types used by
//! the server and by API clients.

pub mod error;
pub mod models;

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
