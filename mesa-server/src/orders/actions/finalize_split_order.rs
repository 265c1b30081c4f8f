//! Finalize an order paid through split payments.

use shared::models::{Order, OrderStatus, SettlementKind};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};
use crate::orders::money;

/// Close a split-paid order. Refuses unless the registered payments
/// cover the total within the one-cent tolerance.
pub async fn finalize_split_order(pool: &SqlitePool, order_id: i64) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status != OrderStatus::Pagamento {
        return Err(AppError::new(ErrorCode::OrderNotAwaitingPayment)
            .with_detail("status", order.status.as_str())
            .into());
    }

    let paid = db::payments::sum_by_order(&mut *tx, order_id).await?;
    if !money::is_payment_sufficient(paid, order.total) {
        let remaining = money::to_f64(
            money::to_decimal(order.total) - money::to_decimal(paid),
        );
        return Err(AppError::new(ErrorCode::SplitPaymentIncomplete)
            .with_detail("paid", paid)
            .with_detail("remaining", remaining)
            .into());
    }

    let settled = db::orders::settle(&mut *tx, order_id, SettlementKind::Split)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderAlreadySettled))?;
    db::audit::append(&mut *tx, order_id, "Finalizado com conta dividida").await?;
    tx.commit().await?;

    info!(order_id, paid, total = settled.total, "split order finalized");
    Ok(settled)
}
