//! mesa-server — restaurant order-management service.
//!
//! Axum HTTP API over a SQLite store: table board, kitchen display,
//! delivery intake, bill splitting and cashier settlement.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;
pub mod state;
pub mod util;
