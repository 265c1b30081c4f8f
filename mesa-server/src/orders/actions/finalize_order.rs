//! Finalize an order for fiscal-document emission.

use shared::models::{Order, SettlementKind};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::load_order;

/// Close any open order, releasing its table for NFC-e emission. No
/// status precondition: a waiter releasing an untouched table lands
/// here directly. No cash-ledger row is written on this path.
/// Finalizing an order that is already settled is a no-op, logged and
/// answered with the stored row.
pub async fn finalize_order(pool: &SqlitePool, order_id: i64) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    if order.settled {
        warn!(order_id, "finalize on an already settled order, ignoring");
        return Ok(order);
    }

    let settled = db::orders::settle(&mut *tx, order_id, SettlementKind::Fiscal)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderAlreadySettled))?;
    db::audit::append(&mut *tx, order_id, "Finalizado para emissao fiscal").await?;
    tx.commit().await?;

    info!(order_id, total = settled.total, "order finalized (fiscal)");
    Ok(settled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::actions::test_support::{item, seed_products, test_pool};
    use crate::orders::actions::{add_items, open_table, request_close};

    #[tokio::test]
    async fn test_finalize_is_idempotent() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();
        request_close(&pool, order.id).await.unwrap();

        let settled = finalize_order(&pool, order.id).await.unwrap();
        assert_eq!(settled.settlement, Some(SettlementKind::Fiscal));

        // Second call reports the stored row without a second close
        let again = finalize_order(&pool, order.id).await.unwrap();
        assert_eq!(again.closed_at, settled.closed_at);

        // No ledger row on the fiscal path
        assert!(db::cash_ledger::find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finalize_settles_fresh_order() {
        let pool = test_pool().await;
        seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();

        // An untouched table is released without going through PAGAMENTO
        let settled = finalize_order(&pool, order.id).await.unwrap();
        assert!(settled.settled);
        assert_eq!(settled.settlement, Some(SettlementKind::Fiscal));

        // Table is free again
        assert!(open_table(&pool, 1).await.is_ok());
    }
}
