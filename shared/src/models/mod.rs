//! Data models
//!
//! Shared between mesa-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod cash_ledger;
pub mod category;
pub mod order;
pub mod product;
pub mod store_info;
pub mod user;

// Re-exports
pub use cash_ledger::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use store_info::*;
pub use user::*;
