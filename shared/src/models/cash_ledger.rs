//! Cash Ledger Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One settlement record written when an order is closed at the register.
/// Timestamps are stored once, in UTC; display formatting is a client
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CashLedgerEntry {
    pub id: i64,
    pub order_id: i64,
    /// Payment method code (e.g. "DINHEIRO", "CARTAO", "PIX")
    pub method: String,
    /// Credit amount in currency unit (= the order total)
    pub amount: f64,
    /// Username of the operator who settled the order
    pub operator: String,
    pub recorded_at: DateTime<Utc>,
}

/// Settle-at-register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleRequest {
    pub method: String,
}
