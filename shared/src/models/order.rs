//! Order Model
//!
//! An order is one open tab: a physical table (`M`), a delivery order (`D`)
//! or a virtual-store order. Lifecycle state, audit log and split payments
//! are stored as three independent structures, never overloaded into one
//! free-text column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order kind. Wire codes are the legacy single-letter values the
/// dashboard and menu clients already speak.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderKind {
    /// Dine-in table ("mesa")
    #[serde(rename = "M")]
    #[cfg_attr(feature = "db", sqlx(rename = "M"))]
    Table,
    /// Delivery order
    #[serde(rename = "D")]
    #[cfg_attr(feature = "db", sqlx(rename = "D"))]
    Delivery,
}

/// Order lifecycle status.
///
/// The kitchen display cycles `NOVO -> PREPARANDO -> PRONTO`; the cashier
/// path goes through `PAGAMENTO` and ends at the terminal `FINALIZADO`.
/// Wire tokens are kept in Portuguese — they are the protocol the existing
/// clients poll for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Novo,
    Preparando,
    Pronto,
    Pagamento,
    Finalizado,
}

impl OrderStatus {
    /// Whether this status may be set through the kitchen-display endpoint.
    /// `FINALIZADO` is reserved for the settle paths.
    pub fn is_kitchen_status(&self) -> bool {
        !matches!(self, OrderStatus::Finalizado)
    }

    /// Wire token, as sent to clients and written to audit entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Novo => "NOVO",
            OrderStatus::Preparando => "PREPARANDO",
            OrderStatus::Pronto => "PRONTO",
            OrderStatus::Pagamento => "PAGAMENTO",
            OrderStatus::Finalizado => "FINALIZADO",
        }
    }
}

/// How a settled order was closed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SettlementKind {
    /// Settled at the cash register (writes a cash-ledger row)
    Register,
    /// Released for fiscal-document (NFC-e) emission
    Fiscal,
    /// Settled through split payments
    Split,
    /// Closed because its items were merged into another order
    Merged,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub kind: OrderKind,
    /// Dine-in table number; None for delivery orders
    pub table_number: Option<i64>,
    /// Virtual-store customer who placed a delivery order
    pub customer_id: Option<i64>,
    pub delivery_address: Option<String>,
    pub status: OrderStatus,
    pub settled: bool,
    pub settlement: Option<SettlementKind>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Sum of line-item totals, in currency unit
    pub subtotal: f64,
    /// Flat delivery fee, zero for dine-in orders
    pub delivery_fee: f64,
    /// subtotal + delivery_fee
    pub total: f64,
}

/// Order line item. `description` and `unit_price` are snapshots copied
/// from the product at insert time, not live references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub description: String,
    pub quantity: i64,
    /// Price in currency unit
    pub unit_price: f64,
    /// quantity * unit_price, persisted on every mutation
    pub total: f64,
    pub note: Option<String>,
}

/// Audit-log entry appended on order mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderAuditEntry {
    pub id: i64,
    pub order_id: i64,
    pub entry: String,
    pub created_at: DateTime<Utc>,
}

/// One registered split payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SplitPayment {
    pub id: i64,
    pub order_id: i64,
    pub payer_number: i64,
    pub payer_name: Option<String>,
    /// Amount in currency unit
    pub amount: f64,
    pub method: String,
    pub paid_at: DateTime<Utc>,
}

/// Order with its line items, as returned by the detail endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// ==================== Request payloads ====================

/// Open table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTableRequest {
    pub table_number: i64,
}

/// One item to add to an order. Description and price are resolved
/// server-side from the product table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub note: Option<String>,
}

/// Add items payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<NewOrderItem>,
}

/// Place delivery order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOrderRequest {
    pub items: Vec<NewOrderItem>,
    pub delivery_address: String,
}

/// Kitchen status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Edit item quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditQuantityRequest {
    pub quantity: i64,
}

/// Transfer order to another table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTableRequest {
    pub table_number: i64,
}

/// Merge two table orders payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeTablesRequest {
    pub origin_id: i64,
    pub dest_id: i64,
}

/// Register split payments payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPaymentInput {
    pub payer_number: i64,
    pub payer_name: Option<String>,
    /// Amount in currency unit
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSplitPaymentsRequest {
    pub payments: Vec<SplitPaymentInput>,
}

/// Split-payment progress for an order in `PAGAMENTO`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitStatus {
    pub order_id: i64,
    /// Order total in currency unit
    pub total: f64,
    /// Sum of registered payments
    pub paid: f64,
    /// total - paid, floored at zero
    pub remaining: f64,
    /// remaining is within one cent of zero
    pub can_finalize: bool,
    pub payments: Vec<SplitPayment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Novo).unwrap(),
            "\"NOVO\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparando).unwrap(),
            "\"PREPARANDO\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Finalizado).unwrap(),
            "\"FINALIZADO\""
        );
        let status: OrderStatus = serde_json::from_str("\"PAGAMENTO\"").unwrap();
        assert_eq!(status, OrderStatus::Pagamento);
    }

    #[test]
    fn test_kind_wire_codes() {
        assert_eq!(serde_json::to_string(&OrderKind::Table).unwrap(), "\"M\"");
        assert_eq!(
            serde_json::to_string(&OrderKind::Delivery).unwrap(),
            "\"D\""
        );
    }

    #[test]
    fn test_kitchen_status_excludes_terminal() {
        assert!(OrderStatus::Novo.is_kitchen_status());
        assert!(OrderStatus::Pagamento.is_kitchen_status());
        assert!(!OrderStatus::Finalizado.is_kitchen_status());
    }
}
